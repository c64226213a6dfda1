// ============================================================================
// PROFILE - Edición de perfil, contraseña y avatar
// ============================================================================

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::components::input::Input;
use crate::hooks::{use_auth, use_toast};
use crate::models::{AvatarUpload, ToastSpec};
use crate::utils::validation::FieldErrors;
use crate::viewmodels::{FormOutcome, ProfileForm, ProfileViewModel};

fn read_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

async fn read_avatar(file: File) -> Result<AvatarUpload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(AvatarUpload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

#[function_component(Profile)]
pub fn profile() -> Html {
    let auth = use_auth();
    let toasts = use_toast();
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let previous_password_ref = use_node_ref();
    let password_ref = use_node_ref();
    let confirmation_ref = use_node_ref();
    let errors = use_state(FieldErrors::new);

    let Some(user) = auth.user().cloned() else {
        return html! {};
    };
    let initial = ProfileForm::from_user(&user);

    let on_submit = {
        let refs = [
            name_ref.clone(),
            email_ref.clone(),
            previous_password_ref.clone(),
            password_ref.clone(),
            confirmation_ref.clone(),
        ];
        let auth = auth.clone();
        let toasts = toasts.clone();
        let errors = errors.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let [name, email, previous_password, password, confirmation] = &refs;
            let form = ProfileForm {
                name: read_value(name),
                email: read_value(email),
                previous_password: read_value(previous_password),
                password: read_value(password),
                password_confirmation: read_value(confirmation),
            };
            let manager = auth.manager();
            let center = toasts.center();
            let errors = errors.clone();
            let password_refs = [previous_password.clone(), password.clone(), confirmation.clone()];

            wasm_bindgen_futures::spawn_local(async move {
                match ProfileViewModel::submit(&*manager, &*center, form).await {
                    FormOutcome::Invalid(field_errors) => errors.set(field_errors),
                    FormOutcome::Submitted => {
                        errors.set(FieldErrors::new());
                        for node in &password_refs {
                            if let Some(input) = node.cast::<HtmlInputElement>() {
                                input.set_value("");
                            }
                        }
                    }
                    FormOutcome::Failed => errors.set(FieldErrors::new()),
                }
            });
        })
    };

    let on_avatar_change = {
        let auth = auth.clone();
        let toasts = toasts.clone();

        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let manager = auth.manager();
            let toasts = toasts.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match read_avatar(file).await {
                    Ok(upload) => {
                        ProfileViewModel::change_avatar(&*manager, &*toasts.center(), upload).await;
                    }
                    Err(e) => {
                        log::error!("❌ [PROFILE] No se pudo leer el archivo: {:?}", e);
                        toasts.add_toast(ToastSpec::error("Error updating avatar"));
                    }
                }
            });
        })
    };

    let on_sign_out = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| auth.sign_out())
    };

    let avatar = match user.avatar_url.clone() {
        Some(url) => html! { <img src={url} alt={user.name.clone()} /> },
        None => html! { <span class="avatar-placeholder">{ user.initials() }</span> },
    };

    html! {
        <div class="profile">
            <header>
                <button type="button" class="btn-sign-out" onclick={on_sign_out}>{"Sign out"}</button>
            </header>

            <div class="profile-content">
                <form class="profile-form" onsubmit={on_submit}>
                    <div class="avatar-input">
                        { avatar }
                        <label for="avatar">
                            {"📷"}
                            <input type="file" id="avatar" accept="image/*" onchange={on_avatar_change} />
                        </label>
                    </div>

                    <h1>{"Profile"}</h1>

                    <Input
                        name="name"
                        placeholder="Name"
                        initial_value={AttrValue::from(initial.name)}
                        node_ref={name_ref}
                        error={errors.get("name").cloned()}
                    />
                    <Input
                        name="email"
                        placeholder="E-mail"
                        initial_value={AttrValue::from(initial.email)}
                        node_ref={email_ref}
                        error={errors.get("email").cloned()}
                    />
                    <Input
                        name="previous_password"
                        input_type="password"
                        placeholder="Current password"
                        node_ref={previous_password_ref}
                        error={errors.get("previous_password").cloned()}
                    />
                    <Input
                        name="password"
                        input_type="password"
                        placeholder="New password"
                        node_ref={password_ref}
                        error={errors.get("password").cloned()}
                    />
                    <Input
                        name="password_confirmation"
                        input_type="password"
                        placeholder="Password confirmation"
                        node_ref={confirmation_ref}
                        error={errors.get("password_confirmation").cloned()}
                    />

                    <button type="submit" class="btn-primary">{"Save"}</button>
                </form>
            </div>
        </div>
    }
}
