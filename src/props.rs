use std::fmt;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Callback fired when the dialog resolves with a confirmation.
pub type ConfirmFn = Rc<dyn Fn(bool)>;
/// Parameterless interaction callback (cancel, close, escape, outside click).
pub type EventFn = Rc<dyn Fn()>;

/// Severity / presentation tag for a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Warning,
    Error,
    Success,
    Info,
    Input,
}

/// The fixed allow-list of HTML input kinds accepted for `input_kind`.
///
/// Reference: https://developer.mozilla.org/en-US/docs/Web/HTML/Element/input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Button,
    Checkbox,
    Color,
    Date,
    Datetime,
    #[serde(rename = "datetime-local")]
    DatetimeLocal,
    Email,
    File,
    Hidden,
    Image,
    Month,
    Number,
    Password,
    Radio,
    Range,
    Reset,
    Search,
    Submit,
    Tel,
    Text,
    Time,
    Url,
    Week,
}

/// `image_size` must look like `"80x80"`: positive width, `x`, positive height.
static IMAGE_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9]\d*x[1-9]\d*").expect("image size pattern"));

/// Non-fatal property diagnostics, surfaced on the `log` channel by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropsWarning {
    /// A permanently disabled property was supplied; it is never forwarded.
    Deprecated { field: &'static str },
    /// `image_size` does not match the `WxH` pattern.
    InvalidImageSize { value: String },
}

impl fmt::Display for PropsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropsWarning::Deprecated { field } => write!(
                f,
                "`{field}` has been removed; drive dismissal with the `show` flag and the result callbacks instead"
            ),
            PropsWarning::InvalidImageSize { value } => write!(
                f,
                "image_size should have the format \"80x80\", got {value:?}"
            ),
        }
    }
}

/// Declarative property set for a dialog.
///
/// Everything except `title` is optional or defaulted; the defaults match the
/// fixed default table (`confirm_button_text = "OK"`, `image_size = "80x80"`,
/// `show_confirm_button = true`, ...). Callbacks are reference-counted so that
/// cloning a prop set preserves handler identity across updates.
#[derive(Clone)]
pub struct DialogProps {
    pub title: String,
    pub text: Option<String>,
    pub kind: Option<DialogKind>,
    pub custom_class: Option<String>,
    pub show_cancel_button: bool,
    pub show_confirm_button: bool,
    pub confirm_button_text: String,
    pub confirm_button_color: String,
    pub cancel_button_text: String,
    pub image_url: Option<String>,
    pub image_size: String,
    pub html: bool,
    pub animation: bool,
    pub input_kind: InputKind,
    pub input_placeholder: Option<String>,
    pub input_value: Option<String>,
    pub show_loader_on_confirm: bool,

    /// Whether the dialog should currently be visible.
    pub show: bool,

    pub on_confirm: Option<ConfirmFn>,
    pub on_cancel: Option<EventFn>,
    pub on_close: Option<EventFn>,
    pub on_escape_key: Option<EventFn>,
    pub on_outside_click: Option<EventFn>,

    // Removed options: accepted for compatibility, warned about, never
    // forwarded. The adapter owns dismissal timing.
    pub timer: Option<u64>,
    pub close_on_confirm: Option<bool>,
    pub close_on_cancel: Option<bool>,
    pub allow_outside_click: Option<bool>,
    pub allow_escape_key: Option<bool>,
}

impl DialogProps {
    /// Create a prop set with the default table applied.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: None,
            kind: None,
            custom_class: None,
            show_cancel_button: false,
            show_confirm_button: true,
            confirm_button_text: "OK".to_string(),
            confirm_button_color: "#AEDEF4".to_string(),
            cancel_button_text: "Cancel".to_string(),
            image_url: None,
            image_size: "80x80".to_string(),
            html: false,
            animation: true,
            input_kind: InputKind::Text,
            input_placeholder: None,
            input_value: None,
            show_loader_on_confirm: false,
            show: false,
            on_confirm: None,
            on_cancel: None,
            on_close: None,
            on_escape_key: None,
            on_outside_click: None,
            timer: None,
            close_on_confirm: None,
            close_on_cancel: None,
            allow_outside_click: None,
            allow_escape_key: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn kind(mut self, kind: DialogKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn custom_class(mut self, class: impl Into<String>) -> Self {
        self.custom_class = Some(class.into());
        self
    }

    pub fn show_cancel_button(mut self, show: bool) -> Self {
        self.show_cancel_button = show;
        self
    }

    pub fn show_confirm_button(mut self, show: bool) -> Self {
        self.show_confirm_button = show;
        self
    }

    pub fn confirm_button_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_button_text = text.into();
        self
    }

    pub fn confirm_button_color(mut self, color: impl Into<String>) -> Self {
        self.confirm_button_color = color.into();
        self
    }

    pub fn cancel_button_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_button_text = text.into();
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn image_size(mut self, size: impl Into<String>) -> Self {
        self.image_size = size.into();
        self
    }

    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    pub fn animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    pub fn input_kind(mut self, kind: InputKind) -> Self {
        self.input_kind = kind;
        self
    }

    pub fn input_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.input_placeholder = Some(placeholder.into());
        self
    }

    pub fn input_value(mut self, value: impl Into<String>) -> Self {
        self.input_value = Some(value.into());
        self
    }

    pub fn show_loader_on_confirm(mut self, show: bool) -> Self {
        self.show_loader_on_confirm = show;
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn on_confirm(mut self, f: ConfirmFn) -> Self {
        self.on_confirm = Some(f);
        self
    }

    pub fn on_cancel(mut self, f: EventFn) -> Self {
        self.on_cancel = Some(f);
        self
    }

    pub fn on_close(mut self, f: EventFn) -> Self {
        self.on_close = Some(f);
        self
    }

    pub fn on_escape_key(mut self, f: EventFn) -> Self {
        self.on_escape_key = Some(f);
        self
    }

    pub fn on_outside_click(mut self, f: EventFn) -> Self {
        self.on_outside_click = Some(f);
        self
    }

    /// Collect the non-fatal diagnostics for this prop set.
    ///
    /// Warnings never block the update; the adapter logs each one and carries
    /// on applying the remaining properties.
    pub fn validate(&self) -> Vec<PropsWarning> {
        let mut warnings = Vec::new();

        for (field, present) in [
            ("timer", self.timer.is_some()),
            ("close_on_confirm", self.close_on_confirm.is_some()),
            ("close_on_cancel", self.close_on_cancel.is_some()),
            ("allow_outside_click", self.allow_outside_click.is_some()),
            ("allow_escape_key", self.allow_escape_key.is_some()),
        ] {
            if present {
                warnings.push(PropsWarning::Deprecated { field });
            }
        }

        if !IMAGE_SIZE_RE.is_match(&self.image_size) {
            warnings.push(PropsWarning::InvalidImageSize {
                value: self.image_size.clone(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_table() {
        let props = DialogProps::new("Title");
        assert_eq!(props.confirm_button_text, "OK");
        assert_eq!(props.confirm_button_color, "#AEDEF4");
        assert_eq!(props.cancel_button_text, "Cancel");
        assert_eq!(props.image_size, "80x80");
        assert_eq!(props.input_kind, InputKind::Text);
        assert!(props.show_confirm_button);
        assert!(!props.show_cancel_button);
        assert!(props.animation);
        assert!(!props.html);
        assert!(!props.show);
        assert!(props.on_confirm.is_none());
    }

    #[test]
    fn default_image_size_is_valid() {
        assert!(DialogProps::new("T").validate().is_empty());
    }

    #[test]
    fn malformed_image_size_warns() {
        let warnings = DialogProps::new("T").image_size("abc").validate();
        assert_eq!(
            warnings,
            vec![PropsWarning::InvalidImageSize {
                value: "abc".to_string()
            }]
        );
        assert!(warnings[0].to_string().contains("abc"));
    }

    #[test]
    fn zero_width_image_size_warns() {
        assert_eq!(DialogProps::new("T").image_size("0x80").validate().len(), 1);
    }

    #[test]
    fn deprecated_fields_each_warn_once() {
        let mut props = DialogProps::new("T");
        props.timer = Some(3000);
        props.allow_escape_key = Some(true);

        let warnings = props.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].to_string().contains("timer"));
        assert!(warnings[1].to_string().contains("allow_escape_key"));
    }

    #[test]
    fn input_kind_wire_names() {
        let json = serde_json::to_value(InputKind::DatetimeLocal).unwrap();
        assert_eq!(json, serde_json::json!("datetime-local"));
        let json = serde_json::to_value(InputKind::Text).unwrap();
        assert_eq!(json, serde_json::json!("text"));
    }

    #[test]
    fn cloning_preserves_callback_identity() {
        let cb: EventFn = Rc::new(|| {});
        let props = DialogProps::new("T").on_outside_click(cb.clone());
        let cloned = props.clone();
        assert!(Rc::ptr_eq(
            props.on_outside_click.as_ref().unwrap(),
            cloned.on_outside_click.as_ref().unwrap()
        ));
    }
}
