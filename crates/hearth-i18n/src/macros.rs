// crates/hearth-i18n/src/macros.rs
// ============================================================================
// Module: Translation Macro
// Description: Call-site shorthand for session translation.
// Purpose: Keep substitution names next to the key they fill.
// Dependencies: crate::session, crate::template
// ============================================================================

//! ## Overview
//! [`t!`](crate::t) mirrors [`LocaleSession::translate`](crate::LocaleSession::translate).

/// Translates a key in a session's active locale with named substitutions.
///
/// # Arguments
///
/// - `$session` is a [`LocaleSession`](crate::LocaleSession) (or a reference to one).
/// - `$key` is a dot-delimited key path.
/// - Named arguments fill `{{placeholder}}` positions; values use [`ToString`].
///
/// # Returns
///
/// A [`String`]; missing keys fall back exactly as
/// [`LocaleSession::translate`](crate::LocaleSession::translate) does.
#[macro_export]
macro_rules! t {
    ($session:expr, $key:expr $(, $name:ident = $value:expr )* $(,)?) => {{
        let substitutions = $crate::Substitutions::new()
            $( .with(stringify!($name), ($value).to_string()) )*;
        $session.translate($key, &substitutions)
    }};
}
