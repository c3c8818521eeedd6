use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Where the agent's control API lives.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Agent running on this machine, the default deployment.
    #[default]
    Local,
    /// Any other endpoint, e.g. a LAN host or an SSH tunnel.
    Custom { base_url: String },
}

impl Environment {
    /// Returns the control API base URL associated with the environment.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Custom { base_url } => base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Environment for an explicit base URL, collapsing the default back to Local.
    pub fn from_base_url(url: &str) -> Self {
        let trimmed = url.trim_end_matches('/');
        if trimmed == "http://localhost:8000" {
            Environment::Local
        } else {
            Environment::Custom {
                base_url: trimmed.to_string(),
            }
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Environment::from_base_url(s))
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_points_at_the_default_port() {
        assert_eq!(Environment::Local.base_url(), "http://localhost:8000");
    }

    #[test]
    fn custom_url_is_normalized() {
        let env = Environment::from_base_url("http://10.0.0.5:8000/");
        assert_eq!(env.base_url(), "http://10.0.0.5:8000");
    }

    #[test]
    fn default_url_collapses_to_local() {
        assert_eq!(
            Environment::from_base_url("http://localhost:8000/"),
            Environment::Local
        );
    }

    #[test]
    fn parses_local_and_urls() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert!("https://agent.example.com".parse::<Environment>().is_ok());
        assert!("not-a-url".parse::<Environment>().is_err());
    }
}
