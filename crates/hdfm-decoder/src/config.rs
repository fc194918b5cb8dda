/// Configuration for [`HdfmDecoder`](crate::HdfmDecoder).
///
/// ```text
/// ┌───────────────────┬───────────────────────────────────────────────┐
/// │ Field             │ Purpose                                       │
/// ├───────────────────┼───────────────────────────────────────────────┤
/// │ inflate           │ Auto-detect and inflate, or keep stored bytes │
/// │ max_inflated_size │ Optional cap on inflated payload size         │
/// └───────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Whether the payload is passed through the inflater.
    pub inflate: InflateMode,

    /// Upper bound on the inflated payload. `None` lets the output grow
    /// for as long as the zlib stream does.
    pub max_inflated_size: Option<usize>,
}

impl Default for DecoderConfig {
    /// Auto-detect compression, no size cap.
    fn default() -> Self {
        Self {
            inflate: InflateMode::Auto,
            max_inflated_size: None,
        }
    }
}

/// What to do with the payload after the header has been read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InflateMode {
    /// Inflate when the payload starts with a zlib header, otherwise keep
    /// it as stored.
    #[default]
    Auto,
    /// Never inflate; the payload is returned exactly as stored.
    Never,
}

impl InflateMode {
    /// Parse a mode name as accepted on the command line.
    ///
    /// Recognised: `auto`, `never`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(Self::Auto),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_inflates_without_limit() {
        let config = DecoderConfig::default();
        assert_eq!(config.inflate, InflateMode::Auto);
        assert_eq!(config.max_inflated_size, None);
    }

    #[test]
    fn mode_names() {
        assert_eq!(InflateMode::from_name("auto"), Some(InflateMode::Auto));
        assert_eq!(InflateMode::from_name("never"), Some(InflateMode::Never));
        assert_eq!(InflateMode::from_name("always"), None);
    }
}
