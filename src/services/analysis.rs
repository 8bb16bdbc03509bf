// ABOUTME: Analysis service composing a vision transport, retry policy, and response interpreter
// ABOUTME: Food photo, body photo, voice workout, and voice food requests end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use pierre_vision_core::models::{MealType, ResultEnvelope, UserProfile, WorkoutType};
use tracing::{debug, field, instrument, Span};
use uuid::Uuid;

use crate::config::VisionConfig;
use crate::errors::AppResult;
use crate::interpretation::{
    BodyPhotoSchema, FoodPhotoSchema, InterpretationContext, RecordSchema, ResponseInterpreter,
    VoiceFoodSchema, VoiceWorkoutSchema,
};
use crate::llm::prompts::build_prompt;
use crate::llm::{
    GeminiTransport, GenerationRequest, MediaPayload, RetryPolicy, TransportCapabilities,
    VisionTransport,
};
use crate::logging::log_interpretation_outcome;

// ============================================================================
// Clock
// ============================================================================

/// Source of the local wall-clock time placed in each request context
pub trait Clock: Send + Sync {
    /// Current local time
    fn local_now(&self) -> NaiveDateTime;
}

/// System local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn local_now(&self) -> NaiveDateTime {
        self.0
    }
}

// ============================================================================
// Service
// ============================================================================

/// Runs one vendor request per call and interprets whatever comes back
pub struct AnalysisService<T: VisionTransport> {
    transport: T,
    retry: RetryPolicy,
    interpreter: ResponseInterpreter<'static>,
    clock: Box<dyn Clock>,
    temperature: Option<f32>,
}

impl AnalysisService<GeminiTransport> {
    /// Gemini-backed service from configuration
    ///
    /// Installs the override tables named by the configuration, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the override tables are invalid
    pub fn from_config(config: &VisionConfig) -> AppResult<Self> {
        let transport = GeminiTransport::from_config(&config.transport)?;
        let tables = config.load_fallback_tables()?;
        Ok(Self::new(transport, RetryPolicy::from_settings(&config.retry))
            .with_interpreter(ResponseInterpreter::new(tables))
            .with_temperature(config.transport.temperature))
    }
}

impl<T: VisionTransport> AnalysisService<T> {
    /// Service over the process-wide tables and the system clock
    #[must_use]
    pub fn new(transport: T, retry: RetryPolicy) -> Self {
        Self {
            transport,
            retry,
            interpreter: ResponseInterpreter::global(),
            clock: Box::new(SystemClock),
            temperature: None,
        }
    }

    /// Replace the interpreter
    #[must_use]
    pub const fn with_interpreter(mut self, interpreter: ResponseInterpreter<'static>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Sampling temperature sent with every request
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Underlying transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Food photo into a [`FoodAnalysis`](pierre_vision_core::models::FoodAnalysis)
    #[instrument(skip_all, fields(request_id = field::Empty, meal_type = ?meal_type))]
    pub async fn analyze_food_photo(
        &self,
        photo: MediaPayload,
        meal_type: Option<MealType>,
    ) -> ResultEnvelope {
        let ctx = self.context().with_meal_type(meal_type);
        self.run::<FoodPhotoSchema>(photo, &ctx).await
    }

    /// Body photo into a [`BodyAnalysis`](pierre_vision_core::models::BodyAnalysis)
    #[instrument(skip_all, fields(request_id = field::Empty))]
    pub async fn analyze_body_photo(
        &self,
        photo: MediaPayload,
        profile: UserProfile,
    ) -> ResultEnvelope {
        let ctx = self.context().with_profile(profile);
        self.run::<BodyPhotoSchema>(photo, &ctx).await
    }

    /// Spoken workout into a [`VoiceWorkout`](pierre_vision_core::models::VoiceWorkout)
    #[instrument(skip_all, fields(request_id = field::Empty, workout_hint = ?workout_hint))]
    pub async fn interpret_voice_workout(
        &self,
        audio: MediaPayload,
        workout_hint: Option<WorkoutType>,
    ) -> ResultEnvelope {
        let ctx = self.context().with_workout_hint(workout_hint);
        self.run::<VoiceWorkoutSchema>(audio, &ctx).await
    }

    /// Spoken meal into a [`VoiceFood`](pierre_vision_core::models::VoiceFood)
    #[instrument(skip_all, fields(request_id = field::Empty, meal_type = ?meal_type))]
    pub async fn interpret_voice_food(
        &self,
        audio: MediaPayload,
        meal_type: Option<MealType>,
    ) -> ResultEnvelope {
        let ctx = self.context().with_meal_type(meal_type);
        self.run::<VoiceFoodSchema>(audio, &ctx).await
    }

    fn context(&self) -> InterpretationContext {
        InterpretationContext::at(self.clock.local_now())
    }

    async fn run<S: RecordSchema>(
        &self,
        media: MediaPayload,
        ctx: &InterpretationContext,
    ) -> ResultEnvelope {
        let started = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let capabilities = self.transport.capabilities();
        let result = if capabilities.accepts(media.kind()) {
            let mut request = GenerationRequest::new(build_prompt(S::KIND, ctx))
                .with_media(media)
                .with_json_mode(capabilities.contains(TransportCapabilities::JSON_MODE));
            if let Some(temperature) = self.temperature {
                request = request.with_temperature(temperature);
            }
            debug!(
                request.id = %request_id,
                transport = self.transport.name(),
                prompt_len = request.prompt.len(),
                "Sending generation request"
            );
            match self.retry.execute(&self.transport, &request).await {
                Ok(envelope) => self.interpreter.interpret_envelope::<S>(&envelope, ctx),
                Err(error) => self
                    .interpreter
                    .interpret_transport_failure::<S>(&error.message, ctx),
            }
        } else {
            let message = format!(
                "{} transport does not accept {:?} input",
                self.transport.name(),
                media.kind()
            );
            self.interpreter
                .interpret_transport_failure::<S>(&message, ctx)
        };

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        log_interpretation_outcome(&request_id, S::KIND, &result, duration_ms);
        result
    }
}

impl<T: VisionTransport> fmt::Debug for AnalysisService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisService")
            .field("transport", &self.transport.name())
            .field("retry", &self.retry)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}
