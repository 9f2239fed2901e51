//! Shared shape of taxonomy entries.

use std::sync::LazyLock;

use regex::Regex;

/// Checks whether the provided `slug` is URL-safe.
pub(crate) fn is_url_safe(slug: &str) -> bool {
    /// Regular expression checking the `slug` is URL-safe.
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,127}$").expect("valid regex")
    });

    REGEX.is_match(slug)
}

/// Defines a taxonomy entry type along with its `Id`, `Name`,
/// `Translation`, `Key` and `Draft` types.
///
/// The entry is addressed either by its canonical `Name` or by its
/// URL-safe `Translation`.
macro_rules! define_taxonomy {
    (
        #[doc = $doc:literal]
        struct $entry:ident;
        module = $module:literal;
        fn $into:ident;
    ) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub struct $entry {
            #[doc = concat!("ID of this [`", stringify!($entry), "`].")]
            pub id: Id,

            #[doc = concat!(
                "Canonical [`Name`] of this [`", stringify!($entry), "`].",
            )]
            pub name: Name,

            #[doc = concat!(
                "[`Translation`] of this [`", stringify!($entry), "`]'s name.",
            )]
            pub translation: Translation,
        }

        impl $entry {
            #[doc = concat!(
                "Checks whether this [`", stringify!($entry), "`] is ",
                "addressed by the provided [`Key`], either via its [`Name`] ",
                "or its [`Translation`].",
            )]
            #[must_use]
            pub fn is_addressed_by(&self, key: &Key) -> bool {
                self.name.0 == key.0 || self.translation.0 == key.0
            }
        }

        #[doc = concat!("ID of a [`", stringify!($entry), "`].")]
        #[derive(
            Clone,
            Copy,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            ::derive_more::FromStr,
            Hash,
            ::derive_more::Into,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        pub struct Id(u64);

        #[doc = concat!("Canonical name of a [`", stringify!($entry), "`].")]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str)]
        pub struct Name(String);

        impl Name {
            /// Creates a new [`Name`] if the given `name` is valid.
            #[must_use]
            pub fn new(name: impl Into<String>) -> Option<Self> {
                let name = name.into();
                let valid = name.trim() == name
                    && !name.is_empty()
                    && name.len() <= 256;
                valid.then_some(Self(name))
            }
        }

        impl ::std::str::FromStr for Name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", $module, "::Name`"))
            }
        }

        #[doc = concat!(
            "Transliterated name of a [`", stringify!($entry), "`], used as ",
            "its public identifier in listing URLs.",
        )]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str)]
        pub struct Translation(String);

        impl Translation {
            /// Creates a new [`Translation`] if the given `slug` is URL-safe.
            #[must_use]
            pub fn new(slug: impl Into<String>) -> Option<Self> {
                let slug = slug.into();
                $crate::domain::taxonomy::is_url_safe(&slug)
                    .then_some(Self(slug))
            }
        }

        impl ::std::str::FromStr for Translation {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
                    .ok_or(concat!("invalid `", $module, "::Translation`"))
            }
        }

        #[doc = concat!(
            "Either a [`Name`] or a [`Translation`] addressing a [`",
            stringify!($entry), "`].",
        )]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str)]
        pub struct Key(String);

        impl Key {
            /// Creates a new [`Key`] if the given `key` is not blank.
            #[must_use]
            pub fn new(key: impl Into<String>) -> Option<Self> {
                let key = key.into();
                (!key.trim().is_empty()).then_some(Self(key))
            }
        }

        impl ::std::str::FromStr for Key {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", $module, "::Key`"))
            }
        }

        impl From<Name> for Key {
            fn from(name: Name) -> Self {
                Self(name.0)
            }
        }

        impl From<Translation> for Key {
            fn from(translation: Translation) -> Self {
                Self(translation.0)
            }
        }

        #[doc = concat!(
            "[`", stringify!($entry), "`] which has not been assigned an ",
            "[`Id`] yet.",
        )]
        #[derive(Clone, Debug)]
        pub struct Draft {
            #[doc = concat!(
                "[`Name`] of the new [`", stringify!($entry), "`].",
            )]
            pub name: Name,

            #[doc = concat!(
                "[`Translation`] of the new [`", stringify!($entry), "`].",
            )]
            pub translation: Translation,
        }

        impl Draft {
            #[doc = concat!(
                "Turns this [`Draft`] into a [`", stringify!($entry), "`] ",
                "with the provided [`Id`].",
            )]
            #[must_use]
            pub fn $into(self, id: Id) -> $entry {
                let Self { name, translation } = self;
                $entry {
                    id,
                    name,
                    translation,
                }
            }
        }
    };
}

pub(crate) use define_taxonomy;

#[cfg(test)]
mod spec {
    use super::is_url_safe;

    #[test]
    fn recognizes_url_safe_slugs() {
        assert!(is_url_safe("a"));
        assert!(is_url_safe("Nizhny_Novgorod-2"));
        assert!(!is_url_safe("_leading"));
        assert!(!is_url_safe("with/slash"));
        assert!(!is_url_safe(&"a".repeat(129)));
    }
}
