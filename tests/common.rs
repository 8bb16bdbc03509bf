// ABOUTME: Shared test utilities for interpretation and analysis service integration tests
// ABOUTME: Scripted mock transport, fixed request times, vendor text fixtures, and record accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `pierre_vision`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use pierre_vision::interpretation::{InterpretationContext, RawEnvelope};
use pierre_vision::llm::{
    GenerationRequest, TransportCapabilities, TransportError, VisionTransport,
};
use pierre_vision::models::{
    BodyAnalysis, DomainRecord, FoodAnalysis, ResultEnvelope, VoiceFood, VoiceWorkout,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Time and context
// ============================================================================

/// 14 March 2025 at the given wall-clock time
pub fn local_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test time")
}

/// Context with only the request time set
pub fn ctx_at(hour: u32, minute: u32) -> InterpretationContext {
    InterpretationContext::at(local_time(hour, minute))
}

// ============================================================================
// Vendor output fixtures
// ============================================================================

/// Well-formed food analysis wrapped in a markdown fence
pub const FENCED_APPLE: &str = "```json\n{\"foodItems\":[{\"name\":\"Apple\",\"estimatedWeight\":150,\"weightType\":\"g\",\"nutritionPer100g\":{\"calories\":52,\"proteins\":0.3,\"fats\":0.2,\"carbs\":14},\"totalCalories\":78,\"confidence\":0.9}],\"estimatedCalories\":78,\"fullDescription\":\"apple\"}\n```";

/// Body analysis the vendor answered in full
pub const BODY_JSON: &str = r#"{
    "bodyFatPercentage": 18.5,
    "musclePercentage": 41.0,
    "bmi": 23.1,
    "bmiCategory": "Normal",
    "bodyType": "Mesomorph",
    "estimatedWaistCm": 82,
    "estimatedChestCm": 100,
    "estimatedHipCm": 95,
    "bmr": 1720,
    "bmrCategory": "Normal",
    "exerciseRecommendations": ["Squat twice a week"],
    "nutritionRecommendations": ["More fibre"],
    "confidence": 0.8,
    "fullDescription": "Athletic build"
}"#;

/// Strength workout nested under `workoutData`
pub const STRENGTH_WORKOUT_JSON: &str = r#"{
    "workoutData": {
        "type": "strength",
        "startTime": "18:00",
        "endTime": "19:00",
        "estimatedCalories": 320,
        "confidence": 0.85,
        "strengthData": {
            "exercises": [
                {"name": "Bench press", "sets": [
                    {"weightKg": 60, "reps": 10, "completed": true},
                    {"weightKg": "62.5", "reps": "8", "completed": "yes"}
                ]}
            ]
        }
    },
    "transcription": "bench press sixty kilos"
}"#;

/// Envelope holding a single text candidate
pub fn envelope(text: &str) -> RawEnvelope {
    RawEnvelope::from_text(text)
}

/// Envelope with no candidates at all
pub fn empty_envelope() -> RawEnvelope {
    serde_json::from_str(r#"{"candidates": []}"#).unwrap()
}

// ============================================================================
// Record accessors
// ============================================================================

pub fn food(result: &ResultEnvelope) -> &FoodAnalysis {
    match result.record.as_ref() {
        Some(DomainRecord::FoodAnalysis(record)) => record,
        other => panic!("expected food analysis, got {other:?}"),
    }
}

pub fn body(result: &ResultEnvelope) -> &BodyAnalysis {
    match result.record.as_ref() {
        Some(DomainRecord::BodyAnalysis(record)) => record,
        other => panic!("expected body analysis, got {other:?}"),
    }
}

pub fn workout(result: &ResultEnvelope) -> &VoiceWorkout {
    match result.record.as_ref() {
        Some(DomainRecord::VoiceWorkout(record)) => record,
        other => panic!("expected voice workout, got {other:?}"),
    }
}

pub fn voice_food(result: &ResultEnvelope) -> &VoiceFood {
    match result.record.as_ref() {
        Some(DomainRecord::VoiceFood(record)) => record,
        other => panic!("expected voice food, got {other:?}"),
    }
}

/// Envelope invariants every result must satisfy
pub fn assert_envelope_invariants(result: &ResultEnvelope) {
    if result.success {
        assert!(result.record.is_some(), "success without record");
    } else {
        assert!(result.record.is_none(), "failure with record");
        assert!(result.reason.is_some(), "failure without reason");
    }
    if result.is_fallback {
        assert!(result.reason.is_some(), "fallback without reason");
        let record = result.record.as_ref().expect("fallback record");
        for confidence in record.confidences() {
            assert!(confidence <= 0.7, "fallback confidence {confidence} above 0.7");
        }
    }
}

// ============================================================================
// Mock transport
// ============================================================================

/// Transport answering from a script; the last entry repeats once the script runs out
pub struct MockTransport {
    script: Mutex<VecDeque<Result<RawEnvelope, TransportError>>>,
    last: Mutex<Option<Result<RawEnvelope, TransportError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicU32,
    capabilities: TransportCapabilities,
}

impl MockTransport {
    pub fn scripted(script: Vec<Result<RawEnvelope, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
            capabilities: TransportCapabilities::multimodal(),
        }
    }

    /// Always answers with the given text
    pub fn replying(text: &str) -> Self {
        Self::scripted(vec![Ok(envelope(text))])
    }

    /// Always fails with the given error
    pub fn failing(error: TransportError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    #[must_use]
    pub const fn with_capabilities(mut self, capabilities: TransportCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionTransport for MockTransport {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn capabilities(&self) -> TransportCapabilities {
        self.capabilities
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<RawEnvelope, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        last.clone().expect("mock transport needs at least one scripted reply")
    }
}
