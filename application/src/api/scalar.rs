//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Represents the target type as a GraphQL string by using [`FromStr`] and
/// [`Display`] impls of the `As` type. Numeric inputs (IDs or prices passed
/// as `Int`s) are accepted too and parsed from their decimal notation.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Constructs the target type from a string or an integer scalar
    /// [`InputValue`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is neither a string nor an integer;
    /// - the input value cannot be parsed into `As` type;
    /// - the parsed value cannot be converted into the target type.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or_default();
        let raw = input
            .as_string_value()
            .map(ToOwned::to_owned)
            .or_else(|| input.as_int_value().map(|n| n.to_string()))
            .ok_or_else(|| {
                format!(
                    "Cannot parse input scalar `{name}`: expected string or \
                     integer input value, found: {input}",
                )
            })?;
        raw.parse::<As>()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{name}` from \"{raw}\": {e}",
                )
            })?
            .try_into()
            .map_err(|e| format!("Cannot parse input scalar `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as either a [`String`] or an
    /// [`i32`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token is neither a string nor an integer.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
            .or_else(|_| <i32 as ParseScalarValue<S>>::from_str(value))
    }
}

#[cfg(test)]
mod spec {
    use juniper::{graphql_input_value, FromInputValue as _, InputValue};

    use crate::api::advert;

    fn id(input: InputValue) -> Option<advert::Id> {
        advert::Id::from_input_value(&input).ok()
    }

    #[test]
    fn accepts_strings_and_integers() {
        let from_str = id(graphql_input_value!("42")).unwrap();
        let from_int = id(graphql_input_value!(42)).unwrap();

        assert_eq!(from_str, from_int);
        assert_eq!(from_str.to_string(), "42");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(id(graphql_input_value!("forty-two")), None);
        assert_eq!(id(graphql_input_value!(-1)), None);
        assert_eq!(id(graphql_input_value!(null)), None);

        let title: InputValue = graphql_input_value!(" padded");
        assert!(advert::Title::from_input_value(&title).is_err());
    }
}
