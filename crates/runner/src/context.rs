use ssr_hierarchy::HierarchyStore;
use ssr_report::ReportWriter;

/// Everything a job needs, built once per run and shared read-only by all
/// workers
#[derive(Debug, Clone)]
pub struct JobContext {
    store: HierarchyStore,
    writer: ReportWriter,
}

impl JobContext {
    pub fn new(store: HierarchyStore, writer: ReportWriter) -> Self {
        Self { store, writer }
    }

    pub fn store(&self) -> &HierarchyStore {
        &self.store
    }

    pub fn writer(&self) -> &ReportWriter {
        &self.writer
    }
}
