use crate::error::Result;
use crate::gradle::GradleScript;
use crate::maven::Pom;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::trace;

pub const DEFAULT_CAPACITY: usize = 256;

/// Parsed build files keyed by path and validated by content hash.
///
/// Every file save triggers a full rediscovery, so most build files are
/// re-read unchanged. Entries whose md5 still matches skip the parse.
pub struct ParseCache {
    poms: LruCache<PathBuf, CacheEntry<Pom>>,
    scripts: LruCache<PathBuf, CacheEntry<GradleScript>>,
    hits: u64,
    misses: u64,
}

struct CacheEntry<T> {
    file_hash: String,
    parsed: T,
}

impl ParseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            poms: LruCache::new(capacity),
            scripts: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn pom(&mut self, path: &Path, source: &str) -> Result<Pom> {
        let (parsed, hit) = lookup(&mut self.poms, path, source, Pom::parse)?;
        self.record(hit);
        Ok(parsed)
    }

    pub fn gradle_script(&mut self, path: &Path, source: &str) -> Result<GradleScript> {
        let (parsed, hit) = lookup(&mut self.scripts, path, source, GradleScript::parse)?;
        self.record(hit);
        Ok(parsed)
    }

    pub fn len(&self) -> usize {
        self.poms.len() + self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn lookup<T: Clone>(
    cache: &mut LruCache<PathBuf, CacheEntry<T>>,
    path: &Path,
    source: &str,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Result<(T, bool)> {
    let file_hash = format!("{:x}", md5::compute(source.as_bytes()));

    if let Some(entry) = cache.get(path) {
        if entry.file_hash == file_hash {
            trace!("Parse cache hit for {}", path.display());
            return Ok((entry.parsed.clone(), true));
        }
    }

    let parsed = parse(source)?;
    cache.put(
        path.to_path_buf(),
        CacheEntry {
            file_hash,
            parsed: parsed.clone(),
        },
    );
    Ok((parsed, false))
}
