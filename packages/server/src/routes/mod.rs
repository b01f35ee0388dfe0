use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::upload::image_upload_body_limit;
use crate::handlers::{inspection, transformer};
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/transformers", transformer_routes(config))
        .nest("/inspections", inspection_routes(config))
}

fn transformer_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            transformer::list_transformers,
            transformer::create_transformer
        ))
        .routes(routes!(
            transformer::get_transformer,
            transformer::update_transformer,
            transformer::delete_transformer
        ));

    let upload = OpenApiRouter::new()
        .routes(routes!(transformer::upload_baseline))
        .layer(image_upload_body_limit(config.storage.max_upload_size));

    crud.merge(upload)
}

fn inspection_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            inspection::list_inspections,
            inspection::create_inspection
        ))
        .routes(routes!(
            inspection::get_inspection,
            inspection::update_inspection,
            inspection::delete_inspection
        ))
        .routes(routes!(inspection::list_by_transformer))
        .routes(routes!(inspection::latest_for_transformer));

    let upload = OpenApiRouter::new()
        .routes(routes!(inspection::upload_maintenance))
        .layer(image_upload_body_limit(config.storage.max_upload_size));

    crud.merge(upload)
}
