//! Stage timeout errors and configuration.

use std::time::Duration;
use strum::IntoEnumIterator;
use veracity_error::VeracityErrorKind;
use veracity_pipeline::{PipelineConfig, PipelineStage};

#[test]
fn test_each_stage_times_out_as_its_own_class() {
    for stage in PipelineStage::iter() {
        let err = stage.timeout_error(Duration::from_secs(7));
        let matches_stage = match stage {
            PipelineStage::Resolving => matches!(err.kind(), VeracityErrorKind::Resolution(_)),
            PipelineStage::Downloading | PipelineStage::Uploading => {
                matches!(err.kind(), VeracityErrorKind::Transfer(_))
            }
            PipelineStage::Scoring => matches!(err.kind(), VeracityErrorKind::Scoring(_)),
        };
        assert!(matches_stage, "{} produced {:?}", stage, err);
        assert!(err.message().contains("7s"), "{}", err.message());
    }
}

#[test]
fn test_sub_second_timeouts_are_not_rounded_to_zero() {
    for stage in PipelineStage::iter() {
        let message = stage.timeout_error(Duration::from_millis(50)).message();
        assert!(message.contains("50ms"), "{}", message);
        assert!(!message.contains("after 0"), "{}", message);
    }
}

#[test]
fn test_stage_names_are_snake_case() {
    assert_eq!(PipelineStage::Resolving.to_string(), "resolving");
    assert_eq!(PipelineStage::Scoring.to_string(), "scoring");
}

#[test]
fn test_default_timeouts() {
    let config = PipelineConfig::default();
    assert_eq!(config.resolve_timeout, Duration::from_secs(30));
    assert_eq!(config.download_timeout, Duration::from_secs(120));
    assert_eq!(config.upload_timeout, Duration::from_secs(120));
    assert_eq!(config.scoring_timeout, Duration::from_secs(90));
    assert_eq!(config.cleanup_timeout, Duration::from_secs(15));
}
