//! ---
//! pcw_section: "01-configuration-resolver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Target language selection."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
//! Requested target languages. Java is a single member of the set and its
//! flavor is stored once beside it, so two Java variants can never be
//! selected together.

use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{Error, Result};
use crate::options::LanguageFlags;

/// One compiler invocation kind per directory. Declaration order is the
/// order in which invocations are issued.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Language {
    Cpp,
    #[strum(serialize = "csharp")]
    CSharp,
    Go,
    GrpcGateway,
    Java,
    Node,
    ObjectiveC,
    Php,
    Python,
    Ruby,
    Swagger,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum JavaFlavor {
    #[default]
    Standard,
    Lite,
    Nano,
}

impl JavaFlavor {
    /// Option prefix handed to the grpc-java plugin, if any.
    pub fn grpc_option(&self) -> Option<&'static str> {
        match self {
            JavaFlavor::Standard => None,
            JavaFlavor::Lite => Some("lite"),
            JavaFlavor::Nano => Some("nano"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    languages: BTreeSet<Language>,
    java_flavor: JavaFlavor,
}

impl TargetSet {
    pub fn new(
        languages: impl IntoIterator<Item = Language>,
        java_flavor: JavaFlavor,
    ) -> Result<Self> {
        let languages: BTreeSet<Language> = languages.into_iter().collect();
        if languages.is_empty() {
            return Err(Error::NoLanguage);
        }
        Ok(Self {
            languages,
            java_flavor,
        })
    }

    pub fn from_flags(flags: &LanguageFlags) -> Result<Self> {
        let java_variants = [
            (flags.java, JavaFlavor::Standard),
            (flags.java_lite, JavaFlavor::Lite),
            (flags.java_nano, JavaFlavor::Nano),
        ];
        let mut selected_java = java_variants
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, flavor)| *flavor);
        let java_flavor = selected_java.next();
        let extra_java = selected_java.next().is_some();

        let languages = [
            (flags.cpp, Language::Cpp),
            (flags.csharp, Language::CSharp),
            (flags.go, Language::Go),
            (flags.grpc_gateway, Language::GrpcGateway),
            (java_flavor.is_some(), Language::Java),
            (flags.node, Language::Node),
            (flags.objc, Language::ObjectiveC),
            (flags.php, Language::Php),
            (flags.python, Language::Python),
            (flags.ruby, Language::Ruby),
            (flags.swagger, Language::Swagger),
        ]
        .into_iter()
        .filter_map(|(enabled, language)| enabled.then_some(language))
        .collect::<Vec<_>>();

        if languages.is_empty() {
            return Err(Error::NoLanguage);
        }
        if extra_java {
            return Err(Error::MultipleJava);
        }
        Self::new(languages, java_flavor.unwrap_or_default())
    }

    pub fn contains(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }

    /// Selected languages in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.iter().copied()
    }

    /// Flavor of the Java target, or `None` when Java is not selected.
    pub fn java_flavor(&self) -> Option<JavaFlavor> {
        self.contains(Language::Java).then_some(self.java_flavor)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
