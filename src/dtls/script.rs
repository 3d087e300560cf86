//! Scripted DTLS engine for unit tests.
//!
//! Reads and write failures are served from queues. Successful writes are
//! recorded. Lifecycle calls bump shared counters.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::engine::{DtlsContext, DtlsEngine, DtlsOptions};
use crate::core::DtlsCode;

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub inits: AtomicUsize,
    pub creates: AtomicUsize,
    pub writes: AtomicUsize,
    pub frees: AtomicUsize,
}

impl Counters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScriptedEngine {
    pub create_result: Result<(), DtlsCode>,
    pub reads: Arc<Mutex<VecDeque<Result<Vec<u8>, DtlsCode>>>>,
    pub write_errors: Arc<Mutex<VecDeque<DtlsCode>>>,
    pub written: Arc<Mutex<Vec<Vec<u8>>>>,
    pub counters: Arc<Counters>,
    pub last_options: Arc<Mutex<Option<DtlsOptions>>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            create_result: Ok(()),
            reads: Arc::default(),
            write_errors: Arc::default(),
            written: Arc::default(),
            counters: Arc::default(),
            last_options: Arc::default(),
        }
    }

    pub fn failing(code: DtlsCode) -> Self {
        Self {
            create_result: Err(code),
            ..Self::new()
        }
    }

    pub fn push_read(&self, item: Result<Vec<u8>, DtlsCode>) {
        self.reads.lock().unwrap().push_back(item);
    }

    pub fn push_write_error(&self, code: DtlsCode) {
        self.write_errors.lock().unwrap().push_back(code);
    }

    pub fn inits(&self) -> usize {
        Counters::get(&self.counters.inits)
    }

    pub fn creates(&self) -> usize {
        Counters::get(&self.counters.creates)
    }

    pub fn frees(&self) -> usize {
        Counters::get(&self.counters.frees)
    }

    pub fn writes(&self) -> usize {
        Counters::get(&self.counters.writes)
    }
}

impl DtlsEngine for ScriptedEngine {
    type Context = ScriptedContext;

    fn init(&self) -> Result<ScriptedContext, DtlsCode> {
        self.counters.inits.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedContext {
            engine: self.clone(),
        })
    }
}

#[derive(Debug)]
pub(crate) struct ScriptedContext {
    engine: ScriptedEngine,
}

impl DtlsContext for ScriptedContext {
    async fn create(&mut self, options: DtlsOptions) -> Result<(), DtlsCode> {
        self.engine.counters.creates.fetch_add(1, Ordering::SeqCst);
        *self.engine.last_options.lock().unwrap() = Some(options);
        self.engine.create_result
    }

    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, DtlsCode> {
        let next = self.engine.reads.lock().unwrap().pop_front();
        match next {
            Some(Ok(data)) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            Some(Err(code)) => Err(code),
            None => {
                tokio::time::sleep(timeout).await;
                Ok(0)
            }
        }
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize, DtlsCode> {
        self.engine.counters.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.engine.write_errors.lock().unwrap().pop_front() {
            return Err(code);
        }
        self.engine.written.lock().unwrap().push(data.to_vec());
        Ok(data.len())
    }
}

impl Drop for ScriptedContext {
    fn drop(&mut self) {
        self.engine.counters.frees.fetch_add(1, Ordering::SeqCst);
    }
}
