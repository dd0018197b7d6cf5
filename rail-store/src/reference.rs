use async_trait::async_trait;
use rail_core::{BookingReferenceGenerator, BoxError};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub const DEFAULT_REFERENCE_START: u64 = 123_456_789;

/// Hands out hex-encoded references from an increasing counter
#[derive(Debug)]
pub struct SequentialReferenceGenerator {
    next: AtomicU64,
}

impl SequentialReferenceGenerator {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    pub fn next_reference(&self) -> String {
        format!("{:x}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for SequentialReferenceGenerator {
    fn default() -> Self {
        Self::starting_at(DEFAULT_REFERENCE_START)
    }
}

#[async_trait]
impl BookingReferenceGenerator for SequentialReferenceGenerator {
    async fn reservation_number(&self) -> Result<String, BoxError> {
        Ok(self.next_reference())
    }
}

/// Random references, for deployments with more than one generator
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidReferenceGenerator;

#[async_trait]
impl BookingReferenceGenerator for UuidReferenceGenerator {
    async fn reservation_number(&self) -> Result<String, BoxError> {
        Ok(Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sequential_references() {
        let generator = SequentialReferenceGenerator::default();
        assert_eq!(generator.reservation_number().await.unwrap(), "75bcd15");
        assert_eq!(generator.reservation_number().await.unwrap(), "75bcd16");
    }

    #[tokio::test]
    async fn test_sequential_references_are_unique_across_tasks() {
        let generator = Arc::new(SequentialReferenceGenerator::starting_at(1));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let generator = generator.clone();
            handles.push(tokio::spawn(async move {
                (0..50).map(|_| generator.next_reference()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for reference in handle.await.unwrap() {
                assert!(seen.insert(reference));
            }
        }
        assert_eq!(seen.len(), 400);
    }

    #[tokio::test]
    async fn test_uuid_references() {
        let generator = UuidReferenceGenerator;
        let first = generator.reservation_number().await.unwrap();
        let second = generator.reservation_number().await.unwrap();

        assert_eq!(first.len(), 32);
        assert_ne!(first, second);
    }
}
