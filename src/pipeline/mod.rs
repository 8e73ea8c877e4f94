//! Display model of the backend's agent pipeline.
//!
//! The backend runs intent detection, retrieval, applicability checks,
//! citation and answer generation in sequence but reports none of it over
//! the wire. This state mirrors that sequence for display only, driven by
//! request start and finish.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Pipeline stages in execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Intent,
    Retriever,
    Applicability,
    Citation,
    Llm,
}

/// Progress of one stage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Idle,
    Waiting,
    Processing,
    Valid,
    AnswerDone,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    pub status: StageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl StageState {
    fn new(status: StageStatus, label: Option<&str>) -> Self {
        Self {
            status,
            label: label.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    pub intent: StageState,
    pub retriever: StageState,
    pub applicability: StageState,
    pub citation: StageState,
    pub llm: StageState,
}

impl PipelineState {
    pub fn stage(&self, stage: Stage) -> &StageState {
        match stage {
            Stage::Intent => &self.intent,
            Stage::Retriever => &self.retriever,
            Stage::Applicability => &self.applicability,
            Stage::Citation => &self.citation,
            Stage::Llm => &self.llm,
        }
    }

    fn stage_mut(&mut self, stage: Stage) -> &mut StageState {
        match stage {
            Stage::Intent => &mut self.intent,
            Stage::Retriever => &mut self.retriever,
            Stage::Applicability => &mut self.applicability,
            Stage::Citation => &mut self.citation,
            Stage::Llm => &mut self.llm,
        }
    }

    /// A request was sent: intent is being classified, retrieval queued.
    pub fn begin_request(&mut self) {
        *self = Self::default();
        self.intent = StageState::new(StageStatus::Processing, Some("Legal processing"));
        self.retriever = StageState::new(StageStatus::Waiting, None);
    }

    /// The answer arrived.
    pub fn complete(&mut self) {
        self.intent = StageState::new(StageStatus::Valid, Some("Done"));
        self.llm = StageState::new(StageStatus::AnswerDone, Some("Done"));
        for stage in [Stage::Retriever, Stage::Applicability, Stage::Citation] {
            let state = self.stage_mut(stage);
            if state.status == StageStatus::Waiting || state.status == StageStatus::Processing {
                state.status = StageStatus::Idle;
            }
        }
    }

    /// The request failed; the reason is shown on the intent stage.
    pub fn fail(&mut self, reason: impl Into<String>) {
        for stage in Stage::iter() {
            let state = self.stage_mut(stage);
            if state.status == StageStatus::Waiting || state.status == StageStatus::Processing {
                state.status = StageStatus::Idle;
            }
        }
        self.intent = StageState {
            status: StageStatus::Failed,
            label: Some(reason.into()),
        };
    }

    /// Whether any stage is still in flight.
    pub fn is_busy(&self) -> bool {
        Stage::iter().any(|stage| {
            matches!(
                self.stage(stage).status,
                StageStatus::Waiting | StageStatus::Processing
            )
        })
    }

    /// `(stage, state)` pairs in execution order.
    pub fn stages(&self) -> impl Iterator<Item = (Stage, &StageState)> + '_ {
        Stage::iter().map(move |stage| (stage, self.stage(stage)))
    }
}
