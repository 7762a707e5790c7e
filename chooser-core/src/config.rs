//! Chooser configuration: button labels, routing tags and page sizing.

use std::env;

use crate::error::ChooserError;

/// Environment variable prefix for [`ChooserConfig::from_env`].
pub const ENV_PREFIX: &str = "CHOOSER_";

/// Most buttons a single action row may hold.
pub const MAX_ROW_WIDTH: usize = 5;
/// Most action rows a single message may carry.
pub const MAX_ROWS: usize = 5;

/// What happens to the message once a selection is chosen or cancelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FinishAction {
    /// Delete the whole message.
    #[default]
    DeleteMessage,
    /// Keep the message, strip its controls.
    StripControls,
}

/// Routing tags embedded in button custom ids as `<namespace>:<kind>[:<payload>]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSet {
    pub namespace: String,
    /// Choice-button kind.
    pub choose: String,
    pub cancel: String,
    pub prev: String,
    pub next: String,
    /// Page-indicator (page-jump trigger) kind.
    pub page: String,
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            namespace: "chs".to_owned(),
            choose: "choose".to_owned(),
            cancel: "cancel".to_owned(),
            prev: "prev".to_owned(),
            next: "next".to_owned(),
            page: "page".to_owned(),
        }
    }
}

impl TagSet {
    fn named(&self) -> [(&'static str, &str); 6] {
        [
            ("namespace", &self.namespace),
            ("choose", &self.choose),
            ("cancel", &self.cancel),
            ("prev", &self.prev),
            ("next", &self.next),
            ("page", &self.page),
        ]
    }

    /// Reject empty tags, tags containing the `:` separator and duplicate kinds.
    pub fn validate(&self) -> Result<(), ChooserError> {
        for (name, tag) in self.named() {
            if tag.is_empty() {
                return Err(ChooserError::configuration(format!(
                    "routing tag `{name}` must not be empty"
                )));
            }
            if tag.contains(':') {
                return Err(ChooserError::configuration(format!(
                    "routing tag `{name}` must not contain ':'"
                )));
            }
        }

        let named = self.named();
        let kinds = &named[1..];
        for (index, (name, tag)) in kinds.iter().enumerate() {
            if let Some((other, _)) = kinds[index + 1..].iter().find(|(_, t)| t == tag) {
                return Err(ChooserError::configuration(format!(
                    "routing tags `{name}` and `{other}` are both `{tag}`"
                )));
            }
        }

        Ok(())
    }
}

/// Full chooser configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChooserConfig {
    pub prev_label: String,
    pub next_label: String,
    /// Label of the multi-page back control; `None` disables it.
    pub multi_prev_label: Option<String>,
    /// Label of the multi-page forward control; `None` disables it.
    pub multi_next_label: Option<String>,
    /// Pages jumped by the multi-skip controls.
    pub multi_skip_pages: usize,
    pub cancel_label: String,
    pub tags: TagSet,
    /// Choice buttons per row.
    pub row_width: usize,
    /// Default items per page.
    pub page_size: usize,
    pub finish: FinishAction,
    /// Whether the page-indicator (jump) row is rendered.
    pub page_button: bool,
    pub page_prompt_text: String,
    pub page_error_text: String,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            prev_label: "⬅️".to_owned(),
            next_label: "➡️".to_owned(),
            multi_prev_label: None,
            multi_next_label: None,
            multi_skip_pages: 5,
            cancel_label: "❌".to_owned(),
            tags: TagSet::default(),
            row_width: 3,
            page_size: 6,
            finish: FinishAction::DeleteMessage,
            page_button: true,
            page_prompt_text: "Choose page".to_owned(),
            page_error_text: "Invalid page number".to_owned(),
        }
    }
}

impl ChooserConfig {
    /// Build a configuration from `CHOOSER_*` process environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ChooserError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary `CHOOSER_*` key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChooserError> {
        let get = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));
        let mut config = Self::default();

        if let Some(value) = get("PREV_LABEL") {
            config.prev_label = value;
        }
        if let Some(value) = get("NEXT_LABEL") {
            config.next_label = value;
        }
        if let Some(value) = get("MULTI_PREV_LABEL") {
            config.multi_prev_label = Some(value).filter(|label| !label.is_empty());
        }
        if let Some(value) = get("MULTI_NEXT_LABEL") {
            config.multi_next_label = Some(value).filter(|label| !label.is_empty());
        }
        if let Some(value) = get("MULTI_SKIP_PAGES") {
            config.multi_skip_pages = parse_count("MULTI_SKIP_PAGES", &value)?;
        }
        if let Some(value) = get("CANCEL_LABEL") {
            config.cancel_label = value;
        }
        if let Some(value) = get("TAG_NAMESPACE") {
            config.tags.namespace = value;
        }
        if let Some(value) = get("TAG_CHOOSE") {
            config.tags.choose = value;
        }
        if let Some(value) = get("TAG_CANCEL") {
            config.tags.cancel = value;
        }
        if let Some(value) = get("TAG_PREV") {
            config.tags.prev = value;
        }
        if let Some(value) = get("TAG_NEXT") {
            config.tags.next = value;
        }
        if let Some(value) = get("TAG_PAGE") {
            config.tags.page = value;
        }
        if let Some(value) = get("ROW_WIDTH") {
            config.row_width = parse_count("ROW_WIDTH", &value)?;
        }
        if let Some(value) = get("PAGE_SIZE") {
            config.page_size = parse_count("PAGE_SIZE", &value)?;
        }
        if let Some(value) = get("DELETE_ON_FINISH") {
            config.finish = if parse_flag("DELETE_ON_FINISH", &value)? {
                FinishAction::DeleteMessage
            } else {
                FinishAction::StripControls
            };
        }
        if let Some(value) = get("PAGE_BUTTON") {
            config.page_button = parse_flag("PAGE_BUTTON", &value)?;
        }
        if let Some(value) = get("PAGE_PROMPT") {
            config.page_prompt_text = value;
        }
        if let Some(value) = get("PAGE_ERROR") {
            config.page_error_text = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on settings the layout engine or router cannot honour.
    pub fn validate(&self) -> Result<(), ChooserError> {
        if self.row_width == 0 {
            return Err(ChooserError::configuration("row width must be positive"));
        }
        if self.row_width > MAX_ROW_WIDTH {
            return Err(ChooserError::configuration(format!(
                "row width {} exceeds the {MAX_ROW_WIDTH} buttons a row can hold",
                self.row_width
            )));
        }
        self.check_page_size(self.page_size)?;
        if self.multi_skip_pages == 0 {
            return Err(ChooserError::configuration(
                "multi-skip distance must be positive",
            ));
        }

        // A one-page multi skip would carry the same tag as the single-step control.
        let multi_enabled = self.multi_prev_label.is_some() || self.multi_next_label.is_some();
        if multi_enabled && self.multi_skip_pages == 1 {
            return Err(ChooserError::configuration(
                "multi-skip distance must be at least 2 when multi-skip labels are set",
            ));
        }

        self.tags.validate()
    }

    /// Check that a full page of `page_size` options fits in one message.
    ///
    /// A page takes one row per `row_width` options, plus the navigation row
    /// and, when enabled, the page-indicator row.
    pub fn check_page_size(&self, page_size: usize) -> Result<(), ChooserError> {
        if page_size == 0 {
            return Err(ChooserError::configuration("page size must be positive"));
        }

        let rows = page_size.div_ceil(self.row_width.max(1)) + 1 + usize::from(self.page_button);
        if rows > MAX_ROWS {
            return Err(ChooserError::configuration(format!(
                "page size {page_size} at row width {} needs {rows} rows, at most {MAX_ROWS} fit",
                self.row_width
            )));
        }

        Ok(())
    }
}

fn parse_count(name: &str, raw: &str) -> Result<usize, ChooserError> {
    raw.trim().parse::<usize>().map_err(|_| {
        ChooserError::configuration(format!(
            "{ENV_PREFIX}{name} must be a non-negative integer, got {raw:?}"
        ))
    })
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, ChooserError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ChooserError::configuration(format!(
            "{ENV_PREFIX}{name} must be a boolean, got {raw:?}"
        ))),
    }
}
