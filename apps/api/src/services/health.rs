//! Health check service
//!
//! Readiness depends on one thing: the configured store answering a trivial
//! query. The in-memory backend always answers.

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::repositories::Store;

/// Status of an individual service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Service is healthy and responding
    Healthy,
    /// Service is unhealthy or unreachable
    Unhealthy,
}

/// Result of a single service health check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// Name of the service
    pub name: &'static str,
    /// Current status
    pub status: ServiceStatus,
    /// Response time in milliseconds (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional details about the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceHealth {
    /// Create a healthy service result with details
    pub fn healthy(name: &'static str, response_time: Duration, details: serde_json::Value) -> Self {
        Self {
            name,
            status: ServiceStatus::Healthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: None,
            details: Some(details),
        }
    }

    /// Create an unhealthy service result with response time
    pub fn unhealthy(name: &'static str, error: impl Into<String>, response_time: Duration) -> Self {
        Self {
            name,
            status: ServiceStatus::Unhealthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: Some(error.into()),
            details: None,
        }
    }
}

/// Aggregated health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    /// Overall status (healthy only if all services are healthy)
    pub status: ServiceStatus,
    /// Individual service health results
    pub services: Vec<ServiceHealth>,
    /// Total time to complete all health checks
    pub total_time_ms: u64,
    /// API version
    pub version: &'static str,
}

impl HealthCheckResponse {
    /// Create a new health check response from individual service results
    pub fn new(services: Vec<ServiceHealth>, total_time: Duration) -> Self {
        let status = if services.iter().all(|s| s.status == ServiceStatus::Healthy) {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            status,
            services,
            total_time_ms: total_time.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Check if overall health is good
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

/// Health check service for the persistence backend
#[derive(Clone)]
pub struct HealthService {
    store: Store,
}

impl HealthService {
    /// Create a new health service
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Check that the store answers queries
    pub async fn check_store(&self) -> ServiceHealth {
        let start = Instant::now();
        let details = serde_json::json!({ "backend": self.store.backend_name() });

        match self.store.ping().await {
            Ok(()) => ServiceHealth::healthy("store", start.elapsed(), details),
            Err(e) => {
                tracing::warn!(error = %e, "Store health check failed");
                ServiceHealth::unhealthy("store", e.public_message(), start.elapsed())
            }
        }
    }

    /// Run all health checks
    pub async fn check_all(&self) -> HealthCheckResponse {
        let start = Instant::now();
        let services = vec![self.check_store().await];
        HealthCheckResponse::new(services, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response_one_unhealthy() {
        let services = vec![
            ServiceHealth::healthy("store", Duration::from_millis(10), serde_json::json!({})),
            ServiceHealth::unhealthy("other", "Connection refused", Duration::from_millis(3)),
        ];
        let response = HealthCheckResponse::new(services, Duration::from_millis(15));
        assert!(!response.is_healthy());
        assert_eq!(response.status, ServiceStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_memory_store_is_healthy() {
        let health = HealthService::new(Store::in_memory());
        let response = health.check_all().await;
        assert!(response.is_healthy());
        assert_eq!(response.services[0].name, "store");
        assert_eq!(
            response.services[0].details.as_ref().unwrap()["backend"],
            "memory"
        );
    }
}
