//! OpenAPI documentation aggregator, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "distcalc API",
        version = "0.1.0",
        description = "Distributed arithmetic calculator: expressions are split into tasks and evaluated by polling agents.",
    ),
    tags(
        (name = "Health", description = "Liveness and dispatcher counters"),
        (name = "Expressions", description = "Submit expressions and read their results"),
        (name = "Internal", description = "Agent protocol: claim tasks and report results"),
    ),
    paths(
        crate::api::health::health,
        crate::api::calculate::calculate,
        crate::api::expressions::list_expressions,
        crate::api::expressions::get_expression,
        crate::api::internal::get_task,
        crate::api::internal::post_task_result,
    ),
    components(schemas(
        crate::api::HealthResponse,
        crate::api::CalculateRequest,
        crate::api::CalculateResponse,
        crate::api::ExpressionsResponse,
        crate::api::ExpressionResponse,
        distcalc_compute::DispatchMetrics,
        distcalc_core::ExpressionView,
        distcalc_core::ExpressionStatus,
        distcalc_core::wire::TaskEnvelope,
        distcalc_core::wire::TaskAssignment,
        distcalc_core::wire::TaskResultReport,
    ))
)]
pub struct ApiDoc;
