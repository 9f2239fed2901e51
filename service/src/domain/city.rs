//! [`City`] definitions.

use crate::domain::taxonomy::define_taxonomy;

define_taxonomy! {
    #[doc = "City an [`Advert`](crate::domain::Advert) is located in."]
    struct City;
    module = "city";
    fn into_city;
}

#[cfg(test)]
mod spec {
    use super::{City, Key, Name, Translation};

    #[test]
    fn validates_translation() {
        assert!(Translation::new("Moskva").is_some());
        assert!(Translation::new("nizhny-novgorod").is_some());
        assert!(Translation::new("").is_none());
        assert!(Translation::new("-moskva").is_none());
        assert!(Translation::new("Sankt Peterburg").is_none());
    }

    #[test]
    fn validates_name() {
        assert!(Name::new("Moscow").is_some());
        assert!(Name::new(" Moscow").is_none());
        assert!(Name::new("").is_none());
        assert!(Key::new("   ").is_none());
    }

    #[test]
    fn addressed_by_either_name() {
        let city = City {
            id: 1_u64.into(),
            name: Name::new("Moscow").unwrap(),
            translation: Translation::new("Moskva").unwrap(),
        };

        assert!(city.is_addressed_by(&Key::new("Moscow").unwrap()));
        assert!(city.is_addressed_by(&Key::new("Moskva").unwrap()));
        assert!(!city.is_addressed_by(&Key::new("moscow").unwrap()));
    }
}
