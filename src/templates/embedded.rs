//! Templates compiled into the binary

use std::borrow::Cow;

use super::{TemplateId, TemplateSource};
use crate::error::GenerationResult;

const ROOT_MAKEFILE: &str = include_str!("../../resources/templates/Makefile.root.tera");
const SRCS_MAKEFILE: &str = include_str!("../../resources/templates/Makefile.srcs.tera");
const MAIN_C: &str = include_str!("../../resources/templates/main.c.tera");
const DEFINITIONS_H: &str = include_str!("../../resources/templates/definitions.h.tera");
const GITIGNORE: &str = include_str!("../../resources/templates/gitignore.tera");
const README_MD: &str = include_str!("../../resources/templates/README.md.tera");
const STARTUP_S: &str = include_str!("../../resources/templates/startup.S");

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn text(id: TemplateId) -> &'static str {
        match id {
            TemplateId::RootMakefile => ROOT_MAKEFILE,
            TemplateId::SrcsMakefile => SRCS_MAKEFILE,
            TemplateId::MainC => MAIN_C,
            TemplateId::DefinitionsH => DEFINITIONS_H,
            TemplateId::Gitignore => GITIGNORE,
            TemplateId::Readme => README_MD,
            TemplateId::Startup => STARTUP_S,
        }
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn describe(&self) -> String {
        "embedded templates".to_string()
    }

    fn load(&self, id: TemplateId) -> GenerationResult<Cow<'_, str>> {
        Ok(Cow::Borrowed(Self::text(id)))
    }
}
