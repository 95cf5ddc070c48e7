/// Log tags identifying the subsystem a line comes from

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Handler,
    Request,
    Executor,
    Broker,
    Webserver,
}

impl LogTag {
    /// Key used for --debug-<key> flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Handler => "handler".to_string(),
            LogTag::Request => "request".to_string(),
            LogTag::Executor => "executor".to_string(),
            LogTag::Broker => "broker".to_string(),
            LogTag::Webserver => "webserver".to_string(),
        }
    }

    /// Uncolored label, as written in plain log lines
    pub fn to_plain_string(&self) -> String {
        self.to_debug_key().to_uppercase()
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
