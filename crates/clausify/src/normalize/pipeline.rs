//! The composed normalization pipeline
//!
//! `Normalizer` runs the nine stages in order over a formula list. Each
//! stage's output can be handed to a `TraceSink`, checked against its
//! invariant, and timed; none of that changes the result.

use super::distribute::conjunct_count;
use super::{
    eliminate_implications, extract_clauses, invariants, push_negation, rename_across, skolemize,
    standardize, strip_universals, to_cnf_bounded, to_prenex, Budget, Stage,
};
use crate::config::NormalizeConfig;
use crate::error::{ClausifyError, Result};
use crate::misc::log::targets::{NORMALIZE as LOG_NORMALIZE, PIPELINE as LOG_PIPELINE};
use crate::logic::{Clause, ClauseSet, Formula, Interner};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::io::{self, Write};
use std::time::{Duration, Instant};

// =============================================================================
// TraceSink
// =============================================================================

/// Receives the output of every stage when tracing is enabled.
///
/// The sink only observes; the pipeline result is the same with or without
/// one.
pub trait TraceSink {
    /// Formula list produced by one of the first eight stages
    fn on_formulas(&mut self, stage: Stage, formulas: &[Formula], interner: &Interner)
        -> io::Result<()>;

    /// Clause list produced by clause extraction
    fn on_clauses(&mut self, clauses: &[Clause], interner: &Interner) -> io::Result<()>;
}

/// Prints each stage as a heading followed by one indented line per item
pub struct WriterSink<W: Write> {
    writer: W,
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        WriterSink::new(io::stdout())
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn section<I>(&mut self, stage: Stage, items: I) -> io::Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        writeln!(self.writer, "After {}:", stage)?;
        for item in items {
            writeln!(self.writer, " {}", item)?;
        }
        writeln!(self.writer)
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn on_formulas(
        &mut self,
        stage: Stage,
        formulas: &[Formula],
        interner: &Interner,
    ) -> io::Result<()> {
        self.section(stage, formulas.iter().map(|f| f.display(interner).to_string()))
    }

    fn on_clauses(&mut self, clauses: &[Clause], interner: &Interner) -> io::Result<()> {
        self.section(
            Stage::ClauseExtraction,
            clauses.iter().map(|c| c.display(interner).to_string()),
        )
    }
}

/// Keeps the rendered output of every stage in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub stages: Vec<(Stage, Vec<String>)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered items recorded for `stage`, if it was traced
    pub fn lines(&self, stage: Stage) -> Option<&[String]> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, lines)| lines.as_slice())
    }
}

impl TraceSink for RecordingSink {
    fn on_formulas(
        &mut self,
        stage: Stage,
        formulas: &[Formula],
        interner: &Interner,
    ) -> io::Result<()> {
        let lines = formulas.iter().map(|f| f.display(interner).to_string()).collect();
        self.stages.push((stage, lines));
        Ok(())
    }

    fn on_clauses(&mut self, clauses: &[Clause], interner: &Interner) -> io::Result<()> {
        let lines = clauses.iter().map(|c| c.display(interner).to_string()).collect();
        self.stages.push((Stage::ClauseExtraction, lines));
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn on_formulas(&mut self, _: Stage, _: &[Formula], _: &Interner) -> io::Result<()> {
        Ok(())
    }

    fn on_clauses(&mut self, _: &[Clause], _: &Interner) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Profile
// =============================================================================

fn secs(d: &Duration) -> f64 {
    d.as_secs_f64()
}

/// Timing and counting data for one run.
///
/// All `Duration` fields are serialized as `f64` seconds.
#[derive(Debug, Clone, Default)]
pub struct NormalizationProfile {
    pub total_time: Duration,
    /// Time spent in each stage, in pipeline order
    pub stage_times: IndexMap<Stage, Duration>,

    pub input_formulas: usize,
    /// Variables renamed by standardization and cross-formula renaming
    pub fresh_variables: usize,
    pub skolem_symbols: usize,
    pub clauses: usize,
    pub max_clause_len: usize,
    /// Most distinct variables in one clause
    pub max_clause_variables: usize,
    /// Deepest term nesting, which grows with skolem function arguments
    pub max_term_depth: usize,
    pub tautologies: usize,
}

struct StageTimes<'a>(&'a IndexMap<Stage, Duration>);

impl Serialize for StageTimes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(self.0.len()))?;
        for (stage, time) in self.0 {
            m.serialize_entry(stage, &secs(time))?;
        }
        m.end()
    }
}

impl Serialize for NormalizationProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("NormalizationProfile", 10)?;
        s.serialize_field("total_time", &secs(&self.total_time))?;
        s.serialize_field("stage_times", &StageTimes(&self.stage_times))?;
        s.serialize_field("input_formulas", &self.input_formulas)?;
        s.serialize_field("fresh_variables", &self.fresh_variables)?;
        s.serialize_field("skolem_symbols", &self.skolem_symbols)?;
        s.serialize_field("clauses", &self.clauses)?;
        s.serialize_field("max_clause_len", &self.max_clause_len)?;
        s.serialize_field("max_clause_variables", &self.max_clause_variables)?;
        s.serialize_field("max_term_depth", &self.max_term_depth)?;
        s.serialize_field("tautologies", &self.tautologies)?;
        s.end()
    }
}

// =============================================================================
// Normalizer
// =============================================================================

/// Result of a normalization run
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The CNF formulas clause extraction started from
    pub formulas: Vec<Formula>,
    pub clauses: Vec<Clause>,
    /// Present when profiling was enabled
    pub profile: Option<NormalizationProfile>,
}

impl Normalized {
    pub fn clause_set(&self) -> ClauseSet {
        ClauseSet::new(self.clauses.clone())
    }
}

/// Runs the normalization stages over a list of formulas
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Normalizer { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    pub fn normalize(&self, formulas: Vec<Formula>, interner: &mut Interner) -> Result<Normalized> {
        self.normalize_with_sink(formulas, interner, &mut NullSink)
    }

    /// Normalize, handing each stage's output to `sink` when tracing is on
    pub fn normalize_with_sink(
        &self,
        formulas: Vec<Formula>,
        interner: &mut Interner,
        sink: &mut dyn TraceSink,
    ) -> Result<Normalized> {
        let start = Instant::now();
        let order = self.config.prenex_order;
        let variables_before = interner.variable_count();

        let mut run = Run {
            config: &self.config,
            budget: Budget::from_config(&self.config, start),
            sink,
            profile: self.config.enable_profiling.then(|| NormalizationProfile {
                input_formulas: formulas.len(),
                ..Default::default()
            }),
        };

        let formulas = run.stage(Stage::ImplicationElimination, formulas, interner, |fs, _| {
            Ok(fs.into_iter().map(eliminate_implications).collect())
        })?;
        let formulas = run.stage(Stage::NegationNormalForm, formulas, interner, |fs, _| {
            Ok(fs.into_iter().map(push_negation).collect())
        })?;
        let formulas = run.stage(Stage::Standardization, formulas, interner, |fs, interner| {
            Ok(fs.into_iter().map(|f| standardize(f, interner)).collect())
        })?;
        let formulas = run.stage(Stage::Prenex, formulas, interner, |fs, _| {
            Ok(fs.into_iter().map(|f| to_prenex(f, order)).collect())
        })?;

        let skolems_before = interner.constant_count();
        let formulas = run.stage(Stage::Skolemization, formulas, interner, |fs, interner| {
            Ok(fs.into_iter().map(|f| skolemize(f, interner)).collect())
        })?;
        let skolem_symbols = interner.constant_count() - skolems_before;
        log::debug!(target: LOG_PIPELINE, "{} skolem symbols introduced", skolem_symbols);

        let formulas = run.stage(Stage::Renaming, formulas, interner, |fs, interner| {
            Ok(rename_across(fs, interner))
        })?;
        let formulas = run.stage(Stage::UniversalStripping, formulas, interner, |fs, _| {
            Ok(fs.into_iter().map(strip_universals).collect())
        })?;

        let budget = run.budget;
        let formulas = run.stage(Stage::Distribution, formulas, interner, |fs, _| {
            let cnf = fs
                .into_iter()
                .map(|f| to_cnf_bounded(f, &budget))
                .collect::<Result<Vec<_>>>()?;
            let total: usize = cnf.iter().map(conjunct_count).sum();
            if budget.max_clauses > 0 && total > budget.max_clauses {
                log::warn!(
                    target: LOG_PIPELINE,
                    "{} clauses in total, limit is {}",
                    total,
                    budget.max_clauses
                );
                return Err(ClausifyError::ClauseLimitExceeded {
                    stage: Stage::Distribution,
                    limit: budget.max_clauses,
                });
            }
            Ok(cnf)
        })?;

        let started = Instant::now();
        let clauses = extract_clauses(&formulas)?;
        if self.config.trace {
            run.sink.on_clauses(&clauses, interner)?;
        }
        run.record(Stage::ClauseExtraction, started.elapsed());

        let profile = run.profile.map(|mut profile| {
            profile.total_time = start.elapsed();
            profile.fresh_variables = interner.variable_count() - variables_before;
            profile.skolem_symbols = skolem_symbols;
            profile.clauses = clauses.len();
            profile.max_clause_len = clauses.iter().map(Clause::len).max().unwrap_or(0);
            profile.max_clause_variables = clauses
                .iter()
                .map(Clause::distinct_variable_count)
                .max()
                .unwrap_or(0);
            profile.max_term_depth = clauses.iter().map(Clause::max_depth).max().unwrap_or(0);
            profile.tautologies = clauses.iter().filter(|c| c.is_tautology()).count();
            profile
        });

        log::info!(
            target: LOG_NORMALIZE,
            "Normalized {} formulas into {} clauses in {:?}",
            formulas.len(),
            clauses.len(),
            start.elapsed()
        );

        Ok(Normalized {
            formulas,
            clauses,
            profile,
        })
    }
}

/// Per-run state shared by the stages
struct Run<'a> {
    config: &'a NormalizeConfig,
    budget: Budget,
    sink: &'a mut dyn TraceSink,
    profile: Option<NormalizationProfile>,
}

impl Run<'_> {
    /// Run one formula-list stage, then trace, check and time its output
    fn stage<F>(
        &mut self,
        stage: Stage,
        formulas: Vec<Formula>,
        interner: &mut Interner,
        f: F,
    ) -> Result<Vec<Formula>>
    where
        F: FnOnce(Vec<Formula>, &mut Interner) -> Result<Vec<Formula>>,
    {
        let started = Instant::now();
        let formulas = f(formulas, interner)?;
        self.record(stage, started.elapsed());

        if self.config.trace {
            self.sink.on_formulas(stage, &formulas, interner)?;
        }
        if self.config.check_invariants
            && !invariants::holds_after(stage, self.config.prenex_order, &formulas)
        {
            return Err(ClausifyError::InvariantViolated { stage });
        }
        self.budget.check_deadline(stage)?;

        Ok(formulas)
    }

    fn record(&mut self, stage: Stage, elapsed: Duration) {
        log::debug!(target: LOG_PIPELINE, "Stage {} ({}) took {:?}", stage.number(), stage, elapsed);
        if let Some(profile) = &mut self.profile {
            profile.stage_times.insert(stage, elapsed);
        }
    }
}
