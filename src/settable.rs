//! Settable-from-text capability and its command-line flag integration.

use std::{ffi::OsStr, fmt, marker::PhantomData};

use clap::{
    Arg, ArgMatches, Command,
    builder::{TypedValueParser, ValueParserFactory},
    error::ErrorKind,
    parser::MatchesError,
};
use serde::{Deserialize, Deserializer, de};
use tracing::debug;

use crate::{errors::ParseDurationError, string_duration::StringDuration};

/// A config value that can be assigned from text and rendered back.
///
/// Flag registries and config decoders are written against this trait so the
/// value's own parsing rules run instead of a generic field assignment.
pub trait Settable: fmt::Display {
    type Err: std::error::Error + Send + Sync + 'static;

    /// Replaces the current value. Leaves it untouched on error.
    fn set(&mut self, value: &str) -> Result<(), Self::Err>;
}

impl Settable for StringDuration {
    type Err = ParseDurationError;

    fn set(&mut self, value: &str) -> Result<(), Self::Err> {
        StringDuration::set(self, value)
    }
}

/// Deserializes a `T` by routing a source string through [`Settable::set`].
///
/// Null or absent sources yield `T::default()`. Usable directly as
/// `#[serde(deserialize_with = "strdur::settable::deserialize")]`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Settable + Default,
{
    let mut value = T::default();
    if let Some(raw) = Option::<String>::deserialize(deserializer)? {
        value.set(&raw).map_err(|e| {
            debug!("Rejected config value {:?}: {}", raw, e);
            de::Error::custom(e)
        })?;
    }
    Ok(value)
}

/// Routes flag values through [`Settable::set`] on a default-constructed `T`.
pub struct SettableValueParser<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> SettableValueParser<T> {
    pub fn new() -> Self {
        Self { marker: PhantomData }
    }
}

impl<T> Default for SettableValueParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SettableValueParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SettableValueParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettableValueParser").finish()
    }
}

impl<T> TypedValueParser for SettableValueParser<T>
where
    T: Settable + Default + Clone + Send + Sync + 'static,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let text = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;

        let mut parsed = T::default();
        parsed.set(text).map_err(|e| {
            let name = arg.map(ToString::to_string).unwrap_or_else(|| "...".to_string());
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid value '{text}' for '{name}': {e}\n"),
            )
            .with_cmd(cmd)
        })?;
        Ok(parsed)
    }
}

impl ValueParserFactory for StringDuration {
    type Parser = SettableValueParser<StringDuration>;

    fn value_parser() -> Self::Parser {
        SettableValueParser::new()
    }
}

/// Registers `--<name>` on `cmd`, assigned through [`Settable::set`] and
/// defaulting to the rendering of `current`.
pub fn flag_var<T>(
    cmd: Command,
    name: impl Into<String>,
    usage: impl Into<String>,
    current: &T,
) -> Command
where
    T: Settable + Default + Clone + Send + Sync + 'static,
{
    let name: String = name.into();
    let usage: String = usage.into();
    debug!("Registering flag --{} (default {})", name, current);
    cmd.arg(
        Arg::new(name.clone())
            .long(name)
            .help(usage)
            .default_value(current.to_string())
            .value_parser(SettableValueParser::<T>::new()),
    )
}

/// Copies the parsed value of flag `name` into `target`.
///
/// Returns `Ok(false)` and leaves `target` alone when the flag has no value.
pub fn assign<T>(matches: &ArgMatches, name: &str, target: &mut T) -> Result<bool, MatchesError>
where
    T: Clone + Send + Sync + 'static,
{
    match matches.try_get_one::<T>(name)? {
        Some(value) => {
            *target = value.clone();
            Ok(true)
        }
        None => Ok(false),
    }
}
