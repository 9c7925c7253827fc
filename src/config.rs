use serde::Serialize;

use crate::props::{DialogKind, DialogProps, InputKind};

/// Immutable snapshot of the allow-listed display properties, in the camelCase
/// wire form the external dialog library consumes.
///
/// Only this fixed schema ever reaches the library: removed options are not
/// representable here, and the four dismissal-behaviour flags are emitted
/// unconditionally as `false`. The adapter, not the library, owns dismissal
/// timing.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogConfig {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DialogKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_class: Option<String>,
    pub show_cancel_button: bool,
    pub show_confirm_button: bool,
    pub confirm_button_text: String,
    pub confirm_button_color: String,
    pub cancel_button_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub image_size: String,
    pub html: bool,
    pub animation: bool,
    #[serde(rename = "inputType")]
    pub input_kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    pub show_loader_on_confirm: bool,

    // Forced overrides, never caller-controlled.
    pub close_on_confirm: bool,
    pub close_on_cancel: bool,
    pub allow_outside_click: bool,
    pub allow_escape_key: bool,
}

impl DialogConfig {
    /// Build the snapshot from a prop set, copying allow-listed keys only and
    /// forcing the dismissal flags to `false`.
    pub fn from_props(props: &DialogProps) -> Self {
        Self {
            title: props.title.clone(),
            text: props.text.clone(),
            kind: props.kind,
            custom_class: props.custom_class.clone(),
            show_cancel_button: props.show_cancel_button,
            show_confirm_button: props.show_confirm_button,
            confirm_button_text: props.confirm_button_text.clone(),
            confirm_button_color: props.confirm_button_color.clone(),
            cancel_button_text: props.cancel_button_text.clone(),
            image_url: props.image_url.clone(),
            image_size: props.image_size.clone(),
            html: props.html,
            animation: props.animation,
            input_kind: props.input_kind,
            input_placeholder: props.input_placeholder.clone(),
            input_value: props.input_value.clone(),
            show_loader_on_confirm: props.show_loader_on_confirm,
            close_on_confirm: false,
            close_on_cancel: false,
            allow_outside_click: false,
            allow_escape_key: false,
        }
    }

    /// The wire object handed to the external library.
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("dialog config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every key the external library is allowed to see.
    const ALLOWED_KEYS: &[&str] = &[
        "title",
        "text",
        "type",
        "customClass",
        "showCancelButton",
        "showConfirmButton",
        "confirmButtonText",
        "confirmButtonColor",
        "cancelButtonText",
        "imageUrl",
        "imageSize",
        "html",
        "animation",
        "inputType",
        "inputPlaceholder",
        "inputValue",
        "showLoaderOnConfirm",
        "closeOnConfirm",
        "closeOnCancel",
        "allowOutsideClick",
        "allowEscapeKey",
    ];

    #[test]
    fn wire_keys_are_allow_listed() {
        let props = DialogProps::new("Title")
            .text("Body")
            .kind(DialogKind::Warning)
            .image_url("cat.png")
            .input_placeholder("Name")
            .input_value("x");
        let wire = DialogConfig::from_props(&props).to_wire();

        let object = wire.as_object().unwrap();
        for key in object.keys() {
            assert!(ALLOWED_KEYS.contains(&key.as_str()), "unexpected key {key}");
        }
        assert_eq!(object["title"], "Title");
        assert_eq!(object["type"], "warning");
    }

    #[test]
    fn dismissal_flags_are_always_false() {
        let mut props = DialogProps::new("Title");
        props.close_on_confirm = Some(true);
        props.allow_escape_key = Some(true);

        let wire = DialogConfig::from_props(&props).to_wire();
        assert_eq!(wire["closeOnConfirm"], false);
        assert_eq!(wire["closeOnCancel"], false);
        assert_eq!(wire["allowOutsideClick"], false);
        assert_eq!(wire["allowEscapeKey"], false);
    }

    #[test]
    fn removed_options_never_reach_the_wire() {
        let mut props = DialogProps::new("Title");
        props.timer = Some(3000);

        let wire = DialogConfig::from_props(&props).to_wire();
        assert!(wire.get("timer").is_none());
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let wire = DialogConfig::from_props(&DialogProps::new("Title")).to_wire();
        let object = wire.as_object().unwrap();
        assert!(!object.contains_key("text"));
        assert!(!object.contains_key("imageUrl"));
        assert_eq!(object["imageSize"], "80x80");
        assert_eq!(object["confirmButtonText"], "OK");
    }
}
