use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::{
    cache_file_name, image_dimensions, AtomicFileWriter, EngineEvent, FetchError, Fetcher,
    ImageCache, PersistError, ProbeError, ProgressSink, SizePolicy, Stage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    Downloaded,
    CacheHit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub url: String,
    pub path: PathBuf,
    pub origin: SelectionOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no candidate urls to try")]
    NoCandidates,
    #[error("no qualifying image after {attempts} attempts")]
    NoQualifyingImage { attempts: usize },
}

/// Why a single candidate was passed over. Never fatal for the pipeline.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("url has no file name")]
    NoFileName,
    #[error("download failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not store image: {0}")]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Unreadable(#[from] ProbeError),
    #[error("too narrow ({width}px < {min_width}px)")]
    TooNarrow { width: u32, min_width: u32 },
}

/// Fetch-and-validate pipeline over a set of candidate URLs.
pub struct ImageSelector {
    fetcher: Arc<dyn Fetcher>,
    cache: ImageCache,
    writer: AtomicFileWriter,
    policy: SizePolicy,
}

impl ImageSelector {
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: ImageCache, policy: SizePolicy) -> Self {
        let writer = AtomicFileWriter::new(cache.dir().to_path_buf());
        Self {
            fetcher,
            cache,
            writer,
            policy,
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Tries each distinct candidate at most once, in an order shuffled by
    /// `rng`. A cached file with the candidate's name is returned without
    /// touching the network; downloads narrower than the policy are deleted.
    /// A cache directory that cannot be written only fails the downloads.
    pub async fn select_image<R: Rng + ?Sized>(
        &self,
        candidates: &[String],
        rng: &mut R,
        sink: &dyn ProgressSink,
    ) -> Result<Selection, SelectError> {
        if candidates.is_empty() {
            return Err(SelectError::NoCandidates);
        }

        let order = shuffled_unique(candidates, rng);
        let mut attempts = 0;
        for url in order {
            attempts += 1;
            match self.try_candidate(&url, sink).await {
                Ok(selection) => return Ok(selection),
                Err(rejection) => {
                    engine_warn!("Skipping {}: {}", url, rejection);
                    sink.emit(EngineEvent::CandidateRejected {
                        url,
                        reason: rejection.to_string(),
                    });
                }
            }
        }

        Err(SelectError::NoQualifyingImage { attempts })
    }

    async fn try_candidate(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Selection, Rejection> {
        let name = cache_file_name(url).ok_or(Rejection::NoFileName)?;

        if let Some(path) = self.cache.lookup(&name) {
            engine_info!("Cache hit for {} at {:?}", url, path);
            return Ok(Selection {
                url: url.to_string(),
                path,
                origin: SelectionOrigin::CacheHit,
            });
        }

        let mut partial = self.writer.begin(&name)?;
        let metadata = self.fetcher.fetch(url, &mut partial, sink).await?;

        sink.emit(EngineEvent::Progress {
            url: url.to_string(),
            stage: Stage::Writing,
            bytes: Some(metadata.byte_len),
        });
        let path = partial.commit()?;

        sink.emit(EngineEvent::Progress {
            url: url.to_string(),
            stage: Stage::Probing,
            bytes: None,
        });
        let verdict = match image_dimensions(&path) {
            Ok((width, _)) if self.policy.accepts(width) => Ok(()),
            Ok((width, _)) => Err(Rejection::TooNarrow {
                width,
                min_width: self.policy.min_width,
            }),
            Err(err) => Err(Rejection::Unreadable(err)),
        };
        if let Err(rejection) = verdict {
            if let Err(err) = self.cache.remove(&path) {
                engine_warn!("Failed to delete rejected image {:?}: {}", path, err);
            }
            return Err(rejection);
        }

        sink.emit(EngineEvent::Progress {
            url: url.to_string(),
            stage: Stage::Done,
            bytes: Some(metadata.byte_len),
        });
        engine_info!("Downloaded {} to {:?}", url, path);
        Ok(Selection {
            url: url.to_string(),
            path,
            origin: SelectionOrigin::Downloaded,
        })
    }
}

fn shuffled_unique<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order: Vec<String> = candidates
        .iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::shuffled_unique;

    #[test]
    fn shuffle_keeps_each_candidate_once() {
        let candidates: Vec<String> = ["a", "b", "a", "c", "b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut order = shuffled_unique(&candidates, &mut rng);
        order.sort();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
