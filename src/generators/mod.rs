//! Concrete generators and their selection by name

pub mod messages;
pub mod properties;
pub mod resources;
pub mod services;

use std::fmt;
use std::str::FromStr;

use crate::generation::Generator;

pub use messages::MessageGenerator;
pub use resources::ResourceGenerator;
pub use services::ServiceGenerator;

/// Which generators a pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    #[default]
    All,
    Resources,
    Services,
    Messages,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::All => "all",
            GeneratorKind::Resources => "resources",
            GeneratorKind::Services => "services",
            GeneratorKind::Messages => "messages",
        }
    }

    /// Generator instances for this selection, in run order
    pub fn generators(&self) -> Vec<Box<dyn Generator>> {
        match self {
            GeneratorKind::All => vec![
                Box::new(ResourceGenerator::new()),
                Box::new(ServiceGenerator::new()),
                Box::new(MessageGenerator::new()),
            ],
            GeneratorKind::Resources => vec![Box::new(ResourceGenerator::new())],
            GeneratorKind::Services => vec![Box::new(ServiceGenerator::new())],
            GeneratorKind::Messages => vec![Box::new(MessageGenerator::new())],
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(GeneratorKind::All),
            "resources" => Ok(GeneratorKind::Resources),
            "services" => Ok(GeneratorKind::Services),
            "messages" => Ok(GeneratorKind::Messages),
            _ => Err(format!(
                "unknown generator '{s}', expected one of: all, resources, services, messages"
            )),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_kind_from_str() {
        assert_eq!("all".parse::<GeneratorKind>(), Ok(GeneratorKind::All));
        assert_eq!("Services".parse::<GeneratorKind>(), Ok(GeneratorKind::Services));
        assert!("widgets".parse::<GeneratorKind>().is_err());
    }

    #[test]
    fn test_generators_for_kind() {
        let names: Vec<&str> = GeneratorKind::All
            .generators()
            .iter()
            .map(|g| g.name())
            .collect();
        assert_eq!(names, vec!["resources", "services", "messages"]);
        assert_eq!(GeneratorKind::Messages.generators().len(), 1);
        assert_eq!(GeneratorKind::default().to_string(), "all");
    }
}
