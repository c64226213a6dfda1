pub mod app;
pub mod input;
pub mod toast_container;
pub mod sign_in;
pub mod profile;

pub use app::App;
pub use input::Input;
pub use toast_container::ToastContainer;
pub use sign_in::SignIn;
pub use profile::Profile;
