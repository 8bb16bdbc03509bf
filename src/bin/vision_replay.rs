// ABOUTME: Developer tool replaying recorded vendor output through the interpretation pipeline
// ABOUTME: Reads an envelope or raw text file and prints the resulting envelope as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Vendor output replay for Pierre Vision.
//!
//! Usage:
//! ```bash
//! # Replay a recorded generateContent response as a food photo analysis
//! cargo run --bin vision-replay -- response.json --kind food-photo --meal-type lunch
//!
//! # Replay raw model text as a voice workout at a fixed local time
//! cargo run --bin vision-replay -- reply.txt --raw-text --kind voice-workout --at 2025-03-14T07:30:00
//!
//! # Body analysis with profile values and custom fallback tables
//! cargo run --bin vision-replay -- body.json --kind body-photo --weight-kg 70 --height-cm 175 \
//!     --age 30 --gender male --tables ./tables.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, ValueEnum};
use pierre_vision::config::VisionConfig;
use pierre_vision::interpretation::{
    BodyPhotoSchema, FoodPhotoSchema, InterpretationContext, RawEnvelope, RecordSchema,
    ResponseInterpreter, VoiceFoodSchema, VoiceWorkoutSchema,
};
use pierre_vision::logging::LoggingConfig;
use pierre_vision::models::{Gender, MealType, ResultEnvelope, UserProfile, WorkoutType};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "vision-replay",
    about = "Pierre Vision vendor output replay",
    long_about = "Run a recorded vendor envelope or raw model text through the interpretation pipeline and print the result"
)]
struct ReplayArgs {
    /// File holding a vendor envelope (JSON) or, with --raw-text, the model text
    input: PathBuf,

    /// Record kind to interpret the output as
    #[arg(long, value_enum, default_value_t = KindArg::FoodPhoto)]
    kind: KindArg,

    /// Treat the input as raw model text instead of a vendor envelope
    #[arg(long)]
    raw_text: bool,

    /// Requested meal type (breakfast, lunch, dinner, snack)
    #[arg(long)]
    meal_type: Option<String>,

    /// Workout type hint (strength, cardio)
    #[arg(long)]
    workout_hint: Option<String>,

    /// Local time of the request, e.g. 2025-03-14T13:05:00; defaults to now
    #[arg(long)]
    at: Option<NaiveDateTime>,

    /// Stored body weight (kg)
    #[arg(long)]
    weight_kg: Option<f64>,

    /// Stored height (cm)
    #[arg(long)]
    height_cm: Option<f64>,

    /// Stored age (years)
    #[arg(long)]
    age: Option<u32>,

    /// Stored gender (male, female)
    #[arg(long)]
    gender: Option<String>,

    /// Fallback tables JSON file, overriding PIERRE_VISION_FALLBACK_TABLES
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    FoodPhoto,
    BodyPhoto,
    VoiceWorkout,
    VoiceFood,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ReplayArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = VisionConfig::from_env().context("invalid environment configuration")?;
    if let Some(path) = &args.tables {
        config.fallback_tables_path = Some(path.clone());
    }
    let tables = config
        .load_fallback_tables()
        .context("failed to load fallback tables")?;
    let interpreter = ResponseInterpreter::new(tables);

    let input = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let envelope = if args.raw_text {
        RawEnvelope::from_text(input)
    } else {
        serde_json::from_str(&input).with_context(|| {
            format!(
                "{} is not a vendor envelope; pass --raw-text for plain model output",
                args.input.display()
            )
        })?
    };

    let ctx = build_context(&args);
    info!(kind = ?args.kind, local_time = %ctx.local_time, "Replaying vendor output");

    let result = match args.kind {
        KindArg::FoodPhoto => replay::<FoodPhotoSchema>(&interpreter, &envelope, &ctx),
        KindArg::BodyPhoto => replay::<BodyPhotoSchema>(&interpreter, &envelope, &ctx),
        KindArg::VoiceWorkout => replay::<VoiceWorkoutSchema>(&interpreter, &envelope, &ctx),
        KindArg::VoiceFood => replay::<VoiceFoodSchema>(&interpreter, &envelope, &ctx),
    };

    let rendered = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{rendered}");
    Ok(())
}

fn replay<S: RecordSchema>(
    interpreter: &ResponseInterpreter<'_>,
    envelope: &RawEnvelope,
    ctx: &InterpretationContext,
) -> ResultEnvelope {
    interpreter.interpret_envelope::<S>(envelope, ctx)
}

fn build_context(args: &ReplayArgs) -> InterpretationContext {
    let local_time = args.at.unwrap_or_else(|| Local::now().naive_local());
    let profile = UserProfile {
        weight_kg: args.weight_kg,
        height_cm: args.height_cm,
        age: args.age,
        gender: args.gender.as_deref().and_then(Gender::from_str_lossy),
    };
    InterpretationContext::at(local_time)
        .with_meal_type(args.meal_type.as_deref().and_then(MealType::from_str_lossy))
        .with_workout_hint(
            args.workout_hint
                .as_deref()
                .and_then(WorkoutType::from_str_lossy),
        )
        .with_profile(profile)
}
