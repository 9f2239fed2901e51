//! [`Category`] definitions.

use crate::domain::taxonomy::define_taxonomy;

define_taxonomy! {
    #[doc = "Category an [`Advert`](crate::domain::Advert) is classified \
             under."]
    struct Category;
    module = "category";
    fn into_category;
}

#[cfg(test)]
mod spec {
    use super::{Draft, Key, Name, Translation};

    #[test]
    fn validates_translation() {
        assert!(Translation::new("Elektronika").is_some());
        assert!(Translation::new("detskie-tovary").is_some());
        assert!(Translation::new("").is_none());
        assert!(Translation::new("-elektronika").is_none());
        assert!(Translation::new("Bytovaya tehnika").is_none());
    }

    #[test]
    fn validates_name() {
        assert!(Name::new("Electronics").is_some());
        assert!(Name::new(" Electronics").is_none());
        assert!(Name::new("").is_none());
        assert!(Key::new("   ").is_none());
    }

    #[test]
    fn draft_keeps_names() {
        let category = Draft {
            name: Name::new("Electronics").unwrap(),
            translation: Translation::new("Elektronika").unwrap(),
        }
        .into_category(7_u64.into());

        assert_eq!(category.id, 7_u64.into());
        assert_eq!(Key::from(category.name.clone()).to_string(), "Electronics");
        assert!(category.is_addressed_by(&category.translation.clone().into()));
    }
}
