use web_sys::{FormData, HtmlFormElement};
use yew::NodeRef;

/// Snapshot the fields of the form behind `form_ref`
pub fn read_form(form_ref: &NodeRef) -> Option<FormData> {
    let form = form_ref.cast::<HtmlFormElement>()?;
    FormData::new_with_form(&form).ok()
}

/// Trimmed text value of a field, empty when missing
pub fn field(form_data: &FormData, name: &str) -> String {
    form_data.get(name).as_string().unwrap_or_default().trim().to_string()
}

pub fn reset_form(form_ref: &NodeRef) {
    if let Some(form) = form_ref.cast::<HtmlFormElement>() {
        form.reset();
    }
}
