use std::collections::HashMap;

/// In-memory key → value mapping for the current settings.
pub type ConfigMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Choice,
}

#[derive(Debug, Clone, Copy)]
pub struct ChoiceDef {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Ordered options; empty unless `kind == Choice`.
    pub choices: &'static [ChoiceDef],
    pub default: &'static str,
    /// Environment variable the MCP server reads; empty = not exported.
    pub export_var: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TabDef {
    pub title: &'static str,
    pub fields: &'static [FieldDef],
}

const ANTHROPIC_MODELS: [ChoiceDef; 3] = [
    ChoiceDef {
        value: "claude-opus-4-6",
        label: "Claude Opus 4.6",
    },
    ChoiceDef {
        value: "claude-sonnet-4-5-20250929",
        label: "Claude Sonnet 4.5",
    },
    ChoiceDef {
        value: "claude-haiku-4-5-20251001",
        label: "Claude Haiku 4.5",
    },
];

const DEEPSEEK_MODELS: [ChoiceDef; 2] = [
    ChoiceDef {
        value: "deepseek-chat",
        label: "deepseek-chat (V3.2)",
    },
    ChoiceDef {
        value: "deepseek-reasoner",
        label: "deepseek-reasoner (V3.2 thinking)",
    },
];

const GEMINI_MODELS: [ChoiceDef; 5] = [
    ChoiceDef {
        value: "gemini-3-pro-preview",
        label: "gemini-3-pro (Preview)",
    },
    ChoiceDef {
        value: "gemini-3-flash-preview",
        label: "gemini-3-flash (Preview)",
    },
    ChoiceDef {
        value: "gemini-2.5-pro",
        label: "gemini-2.5-pro",
    },
    ChoiceDef {
        value: "gemini-2.5-flash",
        label: "gemini-2.5-flash",
    },
    ChoiceDef {
        value: "gemini-2.0-flash",
        label: "gemini-2.0-flash",
    },
];

const TIMEOUTS: [ChoiceDef; 4] = [
    ChoiceDef {
        value: "60000",
        label: "60s",
    },
    ChoiceDef {
        value: "120000",
        label: "120s",
    },
    ChoiceDef {
        value: "180000",
        label: "180s",
    },
    ChoiceDef {
        value: "300000",
        label: "300s",
    },
];

const ON_OFF: [ChoiceDef; 2] = [
    ChoiceDef {
        value: "true",
        label: "On",
    },
    ChoiceDef {
        value: "false",
        label: "Off",
    },
];

const PROVIDERS_TAB: [FieldDef; 6] = [
    FieldDef {
        key: "anthropic_api_key",
        label: "Anthropic API Key",
        kind: FieldKind::Secret,
        choices: &[],
        default: "",
        export_var: "ANTHROPIC_API_KEY",
    },
    FieldDef {
        key: "anthropic_model",
        label: "Anthropic Model",
        kind: FieldKind::Choice,
        choices: &ANTHROPIC_MODELS,
        default: "claude-sonnet-4-5-20250929",
        export_var: "ANTHROPIC_MODEL",
    },
    FieldDef {
        key: "deepseek_api_key",
        label: "DeepSeek API Key",
        kind: FieldKind::Secret,
        choices: &[],
        default: "",
        export_var: "DEEPSEEK_API_KEY",
    },
    FieldDef {
        key: "deepseek_model",
        label: "DeepSeek Model",
        kind: FieldKind::Choice,
        choices: &DEEPSEEK_MODELS,
        default: "deepseek-chat",
        export_var: "DEEPSEEK_MODEL",
    },
    FieldDef {
        key: "deepseek_base_url",
        label: "DeepSeek Base URL",
        kind: FieldKind::Text,
        choices: &[],
        default: "https://api.deepseek.com/v1",
        export_var: "DEEPSEEK_BASE_URL",
    },
    FieldDef {
        key: "gemini_model",
        label: "Gemini Default Model",
        kind: FieldKind::Choice,
        choices: &GEMINI_MODELS,
        default: "gemini-3-pro-preview",
        export_var: "GEMINI_MODEL",
    },
];

const LMSTUDIO_TAB: [FieldDef; 2] = [
    FieldDef {
        key: "lmstudio_base_url",
        label: "LM Studio URL",
        kind: FieldKind::Text,
        choices: &[],
        default: "http://localhost:1234/v1",
        export_var: "LMSTUDIO_BASE_URL",
    },
    FieldDef {
        key: "lmstudio_model",
        label: "LM Studio Model",
        kind: FieldKind::Text,
        choices: &[],
        default: "",
        export_var: "LMSTUDIO_MODEL",
    },
];

const GENERAL_TAB: [FieldDef; 2] = [
    FieldDef {
        key: "timeout_ms",
        label: "Timeout (ms)",
        kind: FieldKind::Choice,
        choices: &TIMEOUTS,
        default: "120000",
        export_var: "LLM_TIMEOUT_MS",
    },
    FieldDef {
        key: "show_splash",
        label: "Show Banner",
        kind: FieldKind::Choice,
        choices: &ON_OFF,
        default: "true",
        export_var: "",
    },
];

/// Tabs in declared order; declaration order is the navigation order.
pub const TABS: [TabDef; 3] = [
    TabDef {
        title: "Providers",
        fields: &PROVIDERS_TAB,
    },
    TabDef {
        title: "LM Studio",
        fields: &LMSTUDIO_TAB,
    },
    TabDef {
        title: "General",
        fields: &GENERAL_TAB,
    },
];

pub fn tabs() -> &'static [TabDef] {
    &TABS
}

pub fn fields() -> impl Iterator<Item = &'static FieldDef> {
    TABS.iter().flat_map(|tab| tab.fields.iter())
}

pub fn field_by_key(key: &str) -> Option<&'static FieldDef> {
    fields().find(|f| f.key == key)
}

/// ConfigMap holding every field's schema default.
pub fn default_config() -> ConfigMap {
    fields()
        .map(|f| (f.key.to_string(), f.default.to_string()))
        .collect()
}
