use super::adapters::{
    Gcc4Adapter, HadoLintAdapter, NagFortranAdapter, NativeAdapter, RevApiAdapter, RfLintAdapter,
};
use super::{IssueParser, JsonParser, ParseOptions, PatternParser};
use crate::error::RegistryError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFamily {
    Text,
    Json,
}

impl std::fmt::Display for InputFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFamily::Text => f.pad("text"),
            InputFamily::Json => f.pad("json"),
        }
    }
}

type Factory = fn(ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError>;

/// Catalog entry for one supported tool.
#[derive(Debug, Clone, Copy)]
pub struct ParserDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub family: InputFamily,
    factory: Factory,
}

impl ParserDescriptor {
    pub fn create(&self, options: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
        (self.factory)(options)
    }
}

fn gcc4(options: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    Ok(Box::new(PatternParser::new(Gcc4Adapter::new()?, options)))
}

fn hadolint(_: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    Ok(Box::new(JsonParser::new(HadoLintAdapter)))
}

fn nagfor(options: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    Ok(Box::new(PatternParser::new(NagFortranAdapter::new()?, options)))
}

fn native(_: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    Ok(Box::new(JsonParser::new(NativeAdapter)))
}

fn revapi(_: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    Ok(Box::new(JsonParser::new(RevApiAdapter)))
}

fn rflint(options: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    Ok(Box::new(PatternParser::new(RfLintAdapter::new()?, options)))
}

const DESCRIPTORS: &[ParserDescriptor] = &[
    ParserDescriptor {
        id: "gcc4",
        name: "GNU C Compiler (gcc)",
        family: InputFamily::Text,
        factory: gcc4,
    },
    ParserDescriptor {
        id: "hadolint",
        name: "HadoLint",
        family: InputFamily::Json,
        factory: hadolint,
    },
    ParserDescriptor {
        id: "nagfor",
        name: "NAG Fortran Compiler (nagfor)",
        family: InputFamily::Text,
        factory: nagfor,
    },
    ParserDescriptor {
        id: "native",
        name: "diagnorm Native Format",
        family: InputFamily::Json,
        factory: native,
    },
    ParserDescriptor {
        id: "revapi",
        name: "Revapi",
        family: InputFamily::Json,
        factory: revapi,
    },
    ParserDescriptor {
        id: "rflint",
        name: "Robot Framework Lint",
        family: InputFamily::Text,
        factory: rflint,
    },
];

/// All registered tools, sorted by id.
pub fn all() -> &'static [ParserDescriptor] {
    DESCRIPTORS
}

pub fn find(id: &str) -> Result<&'static ParserDescriptor, RegistryError> {
    DESCRIPTORS
        .iter()
        .find(|descriptor| descriptor.id == id)
        .ok_or_else(|| RegistryError::UnknownTool(id.to_string()))
}

/// Creates a fresh parser for `id`.
pub fn create(id: &str, options: ParseOptions) -> Result<Box<dyn IssueParser>, RegistryError> {
    find(id)?.create(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_descriptor_creates_matching_parser() {
        for descriptor in all() {
            let parser = descriptor.create(ParseOptions::default()).unwrap();
            assert_eq!(parser.id(), descriptor.id);
            assert_eq!(parser.name(), descriptor.name);
        }
    }

    #[test]
    fn test_ids_are_sorted_and_unique() {
        let ids: Vec<_> = all().iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_unknown_tool() {
        let err = find("javac").unwrap_err();
        assert_eq!(err.to_string(), "No parser registered for tool 'javac'");
    }

    #[test]
    fn test_created_parser_is_usable() {
        let mut parser = create("hadolint", ParseOptions::default()).unwrap();
        let report = parser
            .parse(r#"[{"code":"DL3006","level":"warning","line":5,"column":1,"message":"pin version","file":"Dockerfile"}]"#)
            .unwrap();
        assert_eq!(report.len(), 1);
    }
}
