//! Buffered batch writer.

use fredseries_core::observation::Observation;
use fredseries_core::storage::{ObservationRepository, Result, MAX_BATCH_SIZE};

/// Buffers observations and flushes them to the repository in batches of
/// [`MAX_BATCH_SIZE`].
///
/// A key already present in the buffer is overwritten in place, so a batch
/// never carries duplicate keys. Call [`BatchWriter::finish`] to flush the
/// remainder; dropping the writer discards unflushed observations.
pub struct BatchWriter<'a, R: ObservationRepository + ?Sized> {
    repo: &'a R,
    buffer: Vec<Observation>,
    written: usize,
    batches: usize,
}

impl<'a, R: ObservationRepository + ?Sized> BatchWriter<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            buffer: Vec::with_capacity(MAX_BATCH_SIZE),
            written: 0,
            batches: 0,
        }
    }

    /// Queues an observation, flushing when the buffer is full.
    pub async fn put(&mut self, observation: Observation) -> Result<()> {
        if let Some(existing) = self
            .buffer
            .iter_mut()
            .find(|buffered| buffered.key() == observation.key())
        {
            *existing = observation;
            return Ok(());
        }

        self.buffer.push(observation);
        if self.buffer.len() >= MAX_BATCH_SIZE {
            self.flush().await?;
        }
        Ok(())
    }

    /// Sends the buffered observations, if any.
    pub async fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        self.repo.put_observations(&self.buffer).await?;
        self.batches += 1;
        self.written += self.buffer.len();
        tracing::debug!(
            batch = self.batches,
            items = self.buffer.len(),
            "Flushed batch"
        );
        self.buffer.clear();
        Ok(())
    }

    /// Flushes the remainder and returns the number of items written.
    pub async fn finish(mut self) -> Result<usize> {
        self.flush().await?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;
    use fredseries_core::table::{fred_table_config, TableStatus};

    fn repo() -> InMemoryRepository {
        InMemoryRepository::with_table(fred_table_config(), TableStatus::Active)
    }

    fn day(n: usize) -> Observation {
        Observation::new(format!("2020-{:02}-{:02}", n / 28 + 1, n % 28 + 1), "1.0")
    }

    #[tokio::test]
    async fn test_flushes_full_batches() {
        let repo = repo();
        let mut writer = BatchWriter::new(&repo);
        for n in 0..60 {
            writer.put(day(n)).await.unwrap();
        }
        assert_eq!(repo.batch_write_calls(), 2);

        let written = writer.finish().await.unwrap();
        assert_eq!(written, 60);
        assert_eq!(repo.batch_write_calls(), 3);
        assert_eq!(repo.observations().await.len(), 60);
    }

    #[tokio::test]
    async fn test_duplicate_key_replaces_buffered_item() {
        let repo = repo();
        let mut writer = BatchWriter::new(&repo);
        writer
            .put(Observation::new("2020-01-02", "61.06"))
            .await
            .unwrap();
        writer
            .put(Observation::new("2020-01-02", "61.06"))
            .await
            .unwrap();

        assert_eq!(writer.finish().await.unwrap(), 1);
        assert_eq!(repo.observations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_finish_without_items_writes_nothing() {
        let repo = repo();
        let written = BatchWriter::new(&repo).finish().await.unwrap();
        assert_eq!(written, 0);
        assert_eq!(repo.batch_write_calls(), 0);
    }
}
