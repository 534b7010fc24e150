use bf_sim::EvolutionProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingConfig,
    CheckingCache,
    LoadingCachedResult,
    CompilingRuntime,
    Evolving,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingConfig => "loading config",
            RunStage::CheckingCache => "checking cache",
            RunStage::LoadingCachedResult => "loading cached result",
            RunStage::CompilingRuntime => "compiling runtime",
            RunStage::Evolving => "evolving",
            RunStage::SavingResults => "saving results",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub evolution: Option<EvolutionProgress>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            evolution: None,
        }
    }
}
