// crates/hearth-i18n/src/telemetry.rs
// ============================================================================
// Module: Localization Telemetry
// Description: Observability hooks for translation lookups and locale state.
// Purpose: Surface absorbed failures without making them caller-visible.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every failure this crate absorbs (missing keys, store errors, rejected
//! locale codes) is reported as an [`I18nEvent`] through an
//! [`I18nTelemetry`] sink. Sinks observe only: they never change what a
//! lookup returns or which locale is active.
//!
//! [`NoopTelemetry`] is the default. [`JsonLinesTelemetry`] writes one JSON
//! object per line, and [`RecordingTelemetry`] keeps events in memory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use serde::Serialize;

use crate::locale::LocaleId;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Where a missing translation was eventually served from.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingResolution {
    /// The fallback locale's catalog had the key.
    FallbackLocale,
    /// No catalog had the key; the key path itself was returned.
    KeyLiteral,
}

/// How the session picked its initial locale.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    /// A valid stored preference.
    Stored,
    /// The platform locale.
    System,
    /// The configured default UI locale.
    Default,
}

impl LocaleSource {
    /// Returns a stable label for the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::System => "system",
            Self::Default => "default",
        }
    }
}

/// Localization telemetry event.
///
/// # Invariants
/// - Serialized with an `event` tag in `snake_case`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum I18nEvent {
    /// The requested locale lacked a key.
    MissingTranslation {
        /// Requested key path.
        key: String,
        /// Requested locale.
        locale: LocaleId,
        /// Configured fallback locale.
        fallback: LocaleId,
        /// Where the returned text came from.
        resolved_from: MissingResolution,
    },
    /// Reading the persisted record failed.
    StoreReadFailed {
        /// Storage key.
        key: String,
        /// Backend error message.
        error: String,
    },
    /// Writing or removing the persisted record failed.
    StoreWriteFailed {
        /// Storage key.
        key: String,
        /// Backend error message.
        error: String,
    },
    /// The persisted record did not name a supported locale.
    StoredLocaleRejected {
        /// Raw stored value.
        value: String,
    },
    /// The active locale was set.
    LocaleChanged {
        /// Previous active locale.
        from: LocaleId,
        /// New active locale.
        to: LocaleId,
    },
    /// A requested locale code was not supported.
    LocaleRejected {
        /// Raw requested value.
        value: String,
    },
    /// The session finished initialization.
    SessionInitialized {
        /// Adopted locale.
        locale: LocaleId,
        /// Where it came from.
        source: LocaleSource,
    },
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for localization telemetry.
pub trait I18nTelemetry: Send + Sync {
    /// Records an event.
    fn record(&self, event: I18nEvent);
}

/// No-op telemetry sink.
///
/// # Invariants
/// - Events are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl I18nTelemetry for NoopTelemetry {
    fn record(&self, _event: I18nEvent) {}
}

// ============================================================================
// SECTION: Recording Sink
// ============================================================================

/// Telemetry sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    /// Recorded events in arrival order.
    events: Mutex<Vec<I18nEvent>>,
}

impl RecordingTelemetry {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<I18nEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<I18nEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl I18nTelemetry for RecordingTelemetry {
    fn record(&self, event: I18nEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

// ============================================================================
// SECTION: JSON Lines Sink
// ============================================================================

/// Telemetry sink that writes one JSON object per line.
///
/// # Invariants
/// - Write and serialization failures are dropped.
pub struct JsonLinesTelemetry<W: Write + Send> {
    /// Output writer for event records.
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesTelemetry<W> {
    /// Creates a sink writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> I18nTelemetry for JsonLinesTelemetry<W> {
    fn record(&self, event: I18nEvent) {
        let Ok(mut line) = serde_json::to_vec(&event) else {
            return;
        };
        line.push(b'\n');
        let mut guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.write_all(&line).is_ok() {
            let _ = guard.flush();
        }
    }
}
