// ============================================================================
// SIGN IN - Página de login
// ============================================================================

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::input::Input;
use crate::hooks::{use_auth, use_toast};
use crate::utils::validation::FieldErrors;
use crate::viewmodels::{FormOutcome, SignInForm, SignInViewModel};

fn read_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[function_component(SignIn)]
pub fn sign_in() -> Html {
    let auth = use_auth();
    let toasts = use_toast();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let errors = use_state(FieldErrors::new);
    let submitting = use_state(|| false);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let form = SignInForm {
                email: read_value(&email_ref),
                password: read_value(&password_ref),
            };
            let manager = auth.manager();
            let center = toasts.center();
            let errors = errors.clone();
            let submitting = submitting.clone();
            submitting.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = SignInViewModel::submit(&*manager, &*center, form).await;
                match outcome {
                    FormOutcome::Invalid(field_errors) => errors.set(field_errors),
                    _ => errors.set(FieldErrors::new()),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="sign-in">
            <div class="sign-in-content">
                <h1 class="logo">{"GoBarber"}</h1>

                <form class="sign-in-form" onsubmit={on_submit}>
                    <h2>{"SignIn"}</h2>

                    <Input
                        name="email"
                        placeholder="E-mail"
                        node_ref={email_ref}
                        error={errors.get("email").cloned()}
                    />
                    <Input
                        name="password"
                        input_type="password"
                        placeholder="Password"
                        node_ref={password_ref}
                        error={errors.get("password").cloned()}
                    />

                    <button type="submit" class="btn-primary" disabled={*submitting}>
                        { if *submitting { "Loading..." } else { "Enter" } }
                    </button>

                    <a href="/forgot-password">{"Forgot password"}</a>
                </form>

                <a href="/signup" class="sign-up-link">{"SignUp"}</a>
            </div>
            <div class="sign-in-background" />
        </div>
    }
}
