//! Application provides API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    Extension, Json,
};
use derive_more::Debug;
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::extract::JuniperRequest;
// Used in binary.
use axum_client_ip as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::{Context, Session},
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Memory>;

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        if response.is_ok() {
            Json(response).into_response()
        } else {
            (status_code, Json(response)).into_response()
        }
    }
}

/// GraphQL API handler.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    JuniperResponse {
        status_code: context.error_status_code(),
        response: gql_request.execute(&*schema, &context).await,
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use axum::extract::FromRequestParts as _;
    use common::DateTime;
    use jsonwebtoken::{DecodingKey, EncodingKey, Header};
    use juniper::{graphql_value, DefaultScalarValue, Value, Variables};
    use service::{
        command::{CreateAdvert, CreateCategory, CreateCity},
        domain::{advert, category, city, user::Session},
        infra::Memory,
        Command as _,
    };

    use crate::{api, Context, Service};

    const SECRET: &[u8] = b"secret";

    async fn seeded() -> Service {
        seeded_with(100).await
    }

    async fn seeded_with(max_page_size: usize) -> Service {
        let svc = Service::new(
            service::Config {
                jwt_decoding_key: DecodingKey::from_secret(SECRET),
                max_page_size,
            },
            Memory::new(),
        );
        _ = svc
            .execute(CreateCity {
                name: city::Name::new("Moscow").unwrap(),
                translation: city::Translation::new("Moskva").unwrap(),
            })
            .await
            .unwrap();
        _ = svc
            .execute(CreateCategory {
                name: category::Name::new("Electronics").unwrap(),
                translation: category::Translation::new("Elektronika")
                    .unwrap(),
            })
            .await
            .unwrap();
        svc
    }

    async fn context(svc: &Service, user_id: Option<u64>) -> Context {
        let mut req = http::Request::builder().extension(svc.clone());
        if let Some(id) = user_id {
            let token = jsonwebtoken::encode(
                &Header::default(),
                &Session {
                    user_id: id.into(),
                    expires_at: (DateTime::now() + Duration::from_secs(60))
                        .coerce(),
                },
                &EncodingKey::from_secret(SECRET),
            )
            .unwrap();
            req = req.header(
                http::header::AUTHORIZATION,
                format!("Bearer {token}"),
            );
        }
        let (mut parts, ()) = req.body(()).unwrap().into_parts();

        Context::from_request_parts(&mut parts, &()).await.unwrap()
    }

    async fn execute(
        doc: &str,
        ctx: &Context,
    ) -> (Value<DefaultScalarValue>, usize) {
        let (value, errors) = juniper::execute(
            doc,
            None,
            &api::schema(),
            &Variables::new(),
            ctx,
        )
        .await
        .unwrap();
        (value, errors.len())
    }

    #[tokio::test]
    async fn lists_created_advert() {
        let svc = seeded().await;

        let owner = context(&svc, Some(1)).await;
        let created = execute(
            r#"mutation {
                createAdvert(
                    city: "Moskva",
                    category: "Electronics",
                    title: "Phone",
                    description: "desc",
                    price: "100",
                    isUsed: true,
                ) { id isMine status }
            }"#,
            &owner,
        )
        .await;
        assert_eq!(
            created,
            (
                graphql_value!({"createAdvert": {
                    "id": "1",
                    "isMine": true,
                    "status": "LISTED"
                }}),
                0,
            ),
        );

        let anonymous = context(&svc, None).await;
        let listed = execute(
            r#"{
                adverts(city: "Moscow", count: 5) {
                    edges { node { title isMine } }
                    pageInfo { hasNextPage endCursor }
                }
            }"#,
            &anonymous,
        )
        .await;
        assert_eq!(
            listed,
            (
                graphql_value!({"adverts": {
                    "edges": [{"node": {"title": "Phone", "isMine": false}}],
                    "pageInfo": {"hasNextPage": false, "endCursor": "1"}
                }}),
                0,
            ),
        );
    }

    #[tokio::test]
    async fn requires_authorization_for_mutations() {
        let svc = seeded().await;
        let anonymous = context(&svc, None).await;

        let (_, errors) =
            execute(r#"mutation { closeAdvert(id: "1") { id } }"#, &anonymous)
                .await;

        assert_eq!(errors, 1);
        assert_eq!(
            anonymous.error_status_code(),
            http::StatusCode::UNAUTHORIZED,
        );
    }

    #[tokio::test]
    async fn reports_foreign_advert() {
        let svc = seeded().await;
        let owner = context(&svc, Some(1)).await;
        let stranger = context(&svc, Some(2)).await;

        let (_, errors) = execute(
            r#"mutation {
                createAdvert(
                    city: "Moscow",
                    category: "Elektronika",
                    title: "Phone",
                    description: "",
                    price: "1",
                    isUsed: false,
                ) { id }
            }"#,
            &owner,
        )
        .await;
        assert_eq!(errors, 0);

        let (_, errors) = execute(
            r#"mutation { deleteAdvert(id: "1") }"#,
            &stranger,
        )
        .await;

        assert_eq!(errors, 1);
        assert_eq!(stranger.error_status_code(), http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn default_page_fits_configured_maximum() {
        let svc = seeded_with(2).await;
        for _ in 0..3 {
            _ = svc
                .execute(CreateAdvert {
                    user_id: 1_u64.into(),
                    city: city::Key::new("Moskva").unwrap(),
                    category: category::Key::new("Elektronika").unwrap(),
                    title: advert::Title::new("Phone").unwrap(),
                    description: advert::Description::new("").unwrap(),
                    price: 100_u64.into(),
                    is_used: false,
                })
                .await
                .unwrap();
        }
        let anonymous = context(&svc, None).await;

        let listed = execute(
            r#"{
                adverts(city: "Moscow") {
                    pageInfo { hasNextPage endCursor }
                }
            }"#,
            &anonymous,
        )
        .await;

        assert_eq!(
            listed,
            (
                graphql_value!({"adverts": {
                    "pageInfo": {"hasNextPage": true, "endCursor": "2"}
                }}),
                0,
            ),
        );
    }
}
