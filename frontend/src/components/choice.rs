use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Reads a numeric select value. Empty or malformed means "use the default".
pub fn parse_choice(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[derive(Properties, Clone, PartialEq)]
pub struct ChoiceProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub options: Vec<(u32, &'static str)>,
    pub selected: u32,
    pub on_change: Callback<Option<u32>>,
}

/// Labelled `<select>` over a fixed set of numbers.
#[function_component(Choice)]
pub fn choice(props: &ChoiceProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(parse_choice(&select.value()));
        })
    };

    html! {
        <label class="filter">
            {props.label.clone()}
            <select id={props.id.clone()} {onchange}>
                { for props.options.iter().map(|(value, text)| html! {
                    <option value={value.to_string()} selected={*value == props.selected}>
                        {*text}
                    </option>
                }) }
            </select>
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("30"), Some(30));
        assert_eq!(parse_choice(" 7 "), Some(7));
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("all"), None);
    }
}
