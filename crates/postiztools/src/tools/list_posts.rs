use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, ToolOutput};
use crate::postiz::PostizClient;
use postiztools_core::dates::normalize_date_range;
use postiztools_core::schema::{CliSpec, ParamKind, ParamSpec, ToolSpec};

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-list-posts",
    description: "List posts from Postiz with date range filtering. Date-only inputs are expanded to the full day.",
    params: &[
        ParamSpec {
            name: "startDate",
            kind: ParamKind::String,
            required: true,
            description: "Start date in YYYY-MM-DD or ISO 8601 datetime. Date-only inputs are expanded to 00:00:00.",
        },
        ParamSpec {
            name: "endDate",
            kind: ParamKind::String,
            required: true,
            description: "End date in YYYY-MM-DD or ISO 8601 datetime. Date-only inputs are expanded to 23:59:59.999.",
        },
        ParamSpec {
            name: "customer",
            kind: ParamKind::String,
            required: false,
            description: "Optional customer filter",
        },
    ],
    cli: CliSpec {
        group: Some("posts"),
        command: "list",
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Args {
    start_date: String,
    end_date: String,
    customer: Option<String>,
}

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

async fn execute(client: PostizClient, arguments: Value) -> ToolOutput {
    let args: Args = match parse_args(arguments) {
        Ok(args) => args,
        Err(output) => return *output,
    };

    let (start_date, end_date) = match normalize_date_range(&args.start_date, &args.end_date) {
        Ok(range) => range,
        Err(error) => return ToolOutput::invalid(error),
    };

    match client
        .list_posts(&start_date, &end_date, args.customer.as_deref())
        .await
    {
        Ok(posts) => {
            let count = posts.len();
            ToolOutput::success(json!({
                "posts": posts,
                "count": count,
                "dateRange": {
                    "startDate": start_date,
                    "endDate": end_date,
                },
            }))
        }
        Err(error) => ToolOutput::remote_failure(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postiz::PostizConfig;

    fn test_client() -> PostizClient {
        let config = PostizConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        };
        PostizClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_start_date_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"startDate": "soon", "endDate": "2024-01-15"}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("Invalid startDate. Use YYYY-MM-DD or ISO 8601 datetime")
        );
    }

    #[tokio::test]
    async fn test_invalid_end_date_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"startDate": "2024-01-15", "endDate": "later"}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("Invalid endDate. Use YYYY-MM-DD or ISO 8601 datetime")
        );
    }

    #[test]
    fn test_spec_requires_both_dates() {
        assert_eq!(
            SPEC.input_schema()["required"],
            json!(["startDate", "endDate"])
        );
    }
}
