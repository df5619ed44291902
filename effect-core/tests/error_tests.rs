// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use effect_core::{EffectError, SubjectError};
use std::error::Error;

#[test]
fn invalid_configuration_display() {
    let err = EffectError::invalid_configuration("replay should be more than 0");
    assert_eq!(
        err.to_string(),
        "Invalid configuration: replay should be more than 0"
    );
    assert!(!err.is_closed());
}

#[test]
fn subject_error_converts_transparently() {
    let err: EffectError = SubjectError::Closed.into();

    assert!(err.is_closed());
    assert_eq!(err.to_string(), "Subject is closed");
    assert!(err.source().is_none());
}

#[test]
fn subject_error_is_std_error() {
    fn assert_error<E: Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&SubjectError::Closed);
    assert_error(&EffectError::invalid_configuration("x"));
}

#[test]
fn question_mark_lifts_subject_error() {
    fn fails() -> effect_core::Result<()> {
        Err(SubjectError::Closed)?;
        Ok(())
    }

    assert_eq!(fails(), Err(EffectError::Subject(SubjectError::Closed)));
}
