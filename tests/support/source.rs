use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use arbitrack::domain::{RawItem, SourceKind};
use arbitrack::error::SourceError;
use arbitrack::port::outbound::source::{ItemSource, Query};

enum Script {
    Items(Vec<RawItem>),
    Fail(SourceError),
    Hang,
}

/// Item source that answers each target from a fixed script.
///
/// Unknown targets come back as `NotFound`. Hanging targets sleep for an
/// hour, long past any test deadline.
pub struct ScriptedSource {
    kind: SourceKind,
    scripts: HashMap<String, Script>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            scripts: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(mut self, target: &str, items: Vec<RawItem>) -> Self {
        self.scripts.insert(target.to_string(), Script::Items(items));
        self
    }

    pub fn failing(mut self, target: &str, error: SourceError) -> Self {
        self.scripts.insert(target.to_string(), Script::Fail(error));
        self
    }

    pub fn hanging(mut self, target: &str) -> Self {
        self.scripts.insert(target.to_string(), Script::Hang);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSource for ScriptedSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<RawItem>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(&query.target) {
            Some(Script::Items(items)) => Ok(items
                .iter()
                .cloned()
                .map(|item| item.with_name_override(query.name_override.as_deref()))
                .collect()),
            Some(Script::Fail(error)) => Err(error.clone()),
            Some(Script::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            None => Err(SourceError::NotFound {
                query: query.target.clone(),
            }),
        }
    }
}
