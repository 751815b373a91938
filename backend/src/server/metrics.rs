//! Optional Prometheus metrics middleware.
//!
//! Enabled with the `metrics` feature. Request counters and latency
//! histograms are exposed at `/metrics` under the `learnhub` namespace.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;

const NAMESPACE: &str = "learnhub";
const ENDPOINT: &str = "/metrics";

/// Build the Prometheus middleware served at `/metrics`.
///
/// # Errors
/// Returns [`std::io::Error`] when the default metrics cannot be registered.
pub fn prometheus_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Middleware that records metrics when configured and passes through
/// otherwise, so the app type is the same either way.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            MetricsLayer::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move {
                    let svc = fut.await?;
                    Ok(boxed::service(svc))
                })
            }
            MetricsLayer::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn enabled_layer_serves_the_metrics_endpoint() {
        let layer = MetricsLayer::from_option(Some(prometheus_metrics().expect("metrics")));
        let app = actix_test::init_service(
            App::new()
                .wrap(layer)
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let ping = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/ping").to_request())
            .await;
        assert_eq!(ping.status(), StatusCode::OK);

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(ENDPOINT).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        let text = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(text.contains("learnhub_http_requests_total"));
    }

    #[rstest]
    #[actix_web::test]
    async fn disabled_layer_passes_requests_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(MetricsLayer::from_option(None))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(ENDPOINT).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
