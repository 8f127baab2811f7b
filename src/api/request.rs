//! API request helpers

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use url::Url;
use url::form_urlencoded;

use super::Error;

/// Validate a link, it is kept as provided
///
/// ```rust
/// let link = "https://www.example.com/";
/// assert!(parse_link(link).is_ok())
/// ```
pub fn parse_link(link: &str) -> Result<&str, Error> {
    Url::parse(link)
        .map(|_url| link)
        .map_err(|err| Error::bad_request("Invalid link").with_description(err))
}

/// Make sure a required text field has some content
///
/// ```rust
/// assert!(parse_non_empty("Country", "France").is_ok())
/// ```
pub fn parse_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, Error> {
    if value.trim().is_empty() {
        Err(Error::bad_request(format!("{field} can not be empty")))
    } else {
        Ok(value)
    }
}

/// Treat empty query parameters as missing
pub fn non_empty_query(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Most useful description of a JSON rejection, the inner serde error if there is one
fn describe<E>(err: &E, body_text: String) -> String
where
    E: std::error::Error,
{
    err.source().map_or(body_text, ToString::to_string)
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => Err(Error::bad_request("Data error")
                .with_description(describe(&err, err.body_text()))),
            JsonRejection::JsonSyntaxError(err) => Err(Error::bad_request("JSON syntax error")
                .with_description(describe(&err, err.body_text()))),
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Result::<Json<F>, JsonRejection>::from_request(req, state)
            .await
            .map_err(|_| Error::internal_server_error("Could not extract form"))?;

        parse_json(json).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request("Invalid destination ID").with_description(err.body_text()))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown path error").with_description(err)),
        },
    }
}

/// Wrapper for the path extractor
///
/// Path parameters are destination IDs, so failures are reported as such
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Result::<Path<P>, PathRejection>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::internal_server_error("Could not extract path"))?;

        parse_path(path).map(PathParameters)
    }
}

/// Wrapper for the query extractor
///
/// A repeated parameter does not fail the request, the last value wins
pub struct QueryParameters<Q>(pub Q);

impl<S, Q> FromRequestParts<S> for QueryParameters<Q>
where
    S: Send + Sync,
    Q: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();

        let mut parameters = Map::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            parameters.insert(key.into_owned(), Value::String(value.into_owned()));
        }

        serde_json::from_value(Value::Object(parameters))
            .map(QueryParameters)
            .map_err(|err| Error::bad_request("Invalid query parameters").with_description(err))
    }
}
