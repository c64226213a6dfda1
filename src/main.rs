fn main() {
    gobarber_web::run();
}
