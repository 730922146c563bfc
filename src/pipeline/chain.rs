use crate::data::Item;
use crate::module::{CalculateScore, ModuleBase, ModuleId, ModuleSummary};
use crate::{CrawlError, ErrorKind};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn, Span};

/// Processes one item, optionally returning a replacement and/or an error
pub type ProcessItem = Arc<dyn Fn(&Item) -> (Option<Item>, Option<CrawlError>) + Send + Sync>;

/// Pipeline snapshot: the module summary plus the pipeline's own settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    #[serde(flatten)]
    pub module: ModuleSummary,

    pub fail_fast: bool,

    pub processor_number: usize,
}

/// Runs an ordered list of item processors over each item
///
/// # Failure Policy
///
/// - **Collect-all** (default): every processor runs. A processor that
///   reports an error but also returns an item still hands that item on.
/// - **Fail-fast**: the first error stops the chain; the failing
///   processor's item is discarded.
pub struct Pipeline {
    base: ModuleBase,
    processors: Vec<ProcessItem>,
    fail_fast: AtomicBool,
    span: Span,
}

impl Pipeline {
    /// Creates a pipeline from an ordered processor list
    ///
    /// # Errors
    ///
    /// Returns a parameter error if the score calculator is missing, the
    /// list is empty, or any entry is missing (the message names its index).
    pub fn new(
        id: impl Into<ModuleId>,
        processors: Vec<Option<ProcessItem>>,
        calculate_score: Option<CalculateScore>,
    ) -> Result<Self, CrawlError> {
        let base = ModuleBase::new(id, calculate_score).map_err(|source| {
            CrawlError::Parameter {
                kind: ErrorKind::Pipeline,
                source,
            }
        })?;

        // Validate processors
        if processors.is_empty() {
            return Err(parameter_error("empty item processor list"));
        }

        let mut inner = Vec::with_capacity(processors.len());
        for (idx, processor) in processors.into_iter().enumerate() {
            match processor {
                Some(processor) => inner.push(processor),
                None => return Err(parameter_error(format!("nil item processor[{}]", idx))),
            }
        }

        let span = tracing::info_span!("pipeline", id = %base.id());
        Ok(Self {
            base,
            processors: inner,
            fail_fast: AtomicBool::new(false),
            span,
        })
    }

    /// Replaces the span the pipeline logs under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn id(&self) -> &ModuleId {
        self.base.id()
    }

    pub fn base(&self) -> &ModuleBase {
        &self.base
    }

    /// Returns a copy of the configured processor list
    pub fn processors(&self) -> Vec<ProcessItem> {
        self.processors.clone()
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast.load(Ordering::SeqCst)
    }

    pub fn set_fail_fast(&self, fail_fast: bool) {
        self.fail_fast.store(fail_fast, Ordering::SeqCst);
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            module: self.base.summary(),
            fail_fast: self.fail_fast(),
            processor_number: self.processors.len(),
        }
    }

    /// Sends one item through the processor chain
    ///
    /// # Arguments
    ///
    /// * `item` - The item to process; each processor sees the latest
    ///   replacement returned before it
    ///
    /// # Returns
    ///
    /// Every error collected along the way. A missing item yields a single
    /// parameter error and runs no processor.
    pub fn send(&self, item: Option<Item>) -> Vec<CrawlError> {
        let _entered = self.span.enter();
        let _handling = self.base.handling_guard();
        self.base.incr_called();

        let Some(item) = item else {
            warn!("Rejected item: nil item");
            return vec![parameter_error("nil item")];
        };

        self.base.incr_accepted();
        info!("Process item {:?}", item);

        // Policy is fixed for the whole chain
        let fail_fast = self.fail_fast();
        // Run processors
        let mut errors = Vec::new();
        let mut current = item;
        for (idx, processor) in self.processors.iter().enumerate() {
            let (processed, error) = processor(&current);

            if let Some(error) = error {
                debug!(
                    "Processor {} of {} failed: {}",
                    idx + 1,
                    self.processors.len(),
                    error
                );
                errors.push(error);
                if fail_fast {
                    break;
                }
            }

            if let Some(processed) = processed {
                trace!("Processor {} returned a new item", idx + 1);
                current = processed;
            }
        }

        if errors.is_empty() {
            self.base.incr_completed();
        }

        errors
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("base", &self.base)
            .field("processors", &self.processors.len())
            .field("fail_fast", &self.fail_fast())
            .finish()
    }
}

fn parameter_error(message: impl Into<String>) -> CrawlError {
    CrawlError::parameter(ErrorKind::Pipeline, message)
}
