use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InputProps {
    pub name: AttrValue,
    pub placeholder: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub initial_value: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<String>,
    pub node_ref: NodeRef,
}

/// Input de formulario con el mensaje de error del campo debajo
#[function_component(Input)]
pub fn input(props: &InputProps) -> Html {
    let classes = classes!("form-group", props.error.is_some().then_some("has-error"));

    html! {
        <div class={classes}>
            <input
                id={props.name.clone()}
                name={props.name.clone()}
                type={props.input_type.clone()}
                placeholder={props.placeholder.clone()}
                value={props.initial_value.clone()}
                ref={props.node_ref.clone()}
            />
            if let Some(error) = props.error.clone() {
                <span class="field-error">{ error }</span>
            }
        </div>
    }
}
