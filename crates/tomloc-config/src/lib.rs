use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomLocConfig {
    pub resources_dir: Option<String>,
    pub list_limit: Option<usize>,
    pub search: Option<SearchCfg>,
    pub create: Option<CreateCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCfg {
    pub case_sensitive: Option<bool>,
    /// "contains" | "begins-with" | "ends-with" | "equals"
    pub match_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCfg {
    pub auto_fill: Option<bool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

pub fn load_config() -> Result<TomLocConfig, ConfigError> {
    // Search order: CWD/tomloc.toml, $HOME/.config/tomloc/tomloc.toml
    let mut merged = TomLocConfig::default();
    if let Ok(p) = std::env::current_dir() {
        let path = p.join("tomloc.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<TomLocConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("tomloc").join("tomloc.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<TomLocConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    Ok(merged)
}

fn merge(mut a: TomLocConfig, b: TomLocConfig) -> TomLocConfig {
    if a.resources_dir.is_none() {
        a.resources_dir = b.resources_dir;
    }
    if a.list_limit.is_none() {
        a.list_limit = b.list_limit;
    }
    a.search = merge_opt(a.search, b.search, merge_search);
    a.create = merge_opt(a.create, b.create, merge_create);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_search(mut a: SearchCfg, b: SearchCfg) -> SearchCfg {
    if a.case_sensitive.is_none() {
        a.case_sensitive = b.case_sensitive;
    }
    if a.match_mode.is_none() {
        a.match_mode = b.match_mode;
    }
    a
}

fn merge_create(mut a: CreateCfg, b: CreateCfg) -> CreateCfg {
    if a.auto_fill.is_none() {
        a.auto_fill = b.auto_fill;
    }
    a
}
