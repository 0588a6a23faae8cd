//! An in-memory stand-in for the REST server, used by the tests in this crate
use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::{collections::BTreeMap, sync::Mutex};

#[derive(Default)]
struct State {
    resources: BTreeMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
    requests: Vec<ApiRequest>,
    fail_with: Option<u16>,
}

/// Mimics the `/api/{resource}` endpoints of the server, storing everything in memory
#[derive(Default)]
pub(crate) struct FakeTransport {
    state: Mutex<State>,
}

fn bad_request(title: &str) -> ApiResponse {
    ApiResponse::new(400, Some(json!({ "title": title, "status": 400 })))
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store an object directly, bypassing the api. Returns the assigned id.
    pub(crate) fn seed(&self, resource: &str, mut object: Value) -> i64 {
        let mut state = self.state.lock().expect("poisoned lock");
        state.next_id += 1;
        let id = state.next_id;
        object["id"] = json!(id);
        state
            .resources
            .entry(resource.to_string())
            .or_default()
            .insert(id, object);
        id
    }

    /// Make every following request fail with the given status
    pub(crate) fn fail_with(&self, status: Option<u16>) {
        self.state.lock().expect("poisoned lock").fail_with = status;
    }

    /// All requests received so far
    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().expect("poisoned lock").requests.clone()
    }

    pub(crate) fn methods(&self) -> Vec<Method> {
        self.requests().iter().map(|r| r.method).collect()
    }

    pub(crate) fn stored(&self, resource: &str, id: i64) -> Option<Value> {
        self.state
            .lock()
            .expect("poisoned lock")
            .resources
            .get(resource)
            .and_then(|r| r.get(&id))
            .cloned()
    }

    fn handle(state: &mut State, request: &ApiRequest) -> ApiResponse {
        let mut parts = request.path.trim_matches('/').split('/');
        let (Some("api"), Some(resource)) = (parts.next(), parts.next()) else {
            return ApiResponse::new(404, None);
        };
        let id = match parts.next().map(str::parse::<i64>) {
            None => None,
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => return ApiResponse::new(404, None),
        };
        let body_id = request
            .body
            .as_ref()
            .and_then(|b| b.get("id"))
            .and_then(Value::as_i64);

        match (request.method, id) {
            (Method::Get, None) => {
                let all: Vec<Value> = state
                    .resources
                    .get(resource)
                    .map(|r| r.values().cloned().collect())
                    .unwrap_or_default();
                let param = |name: &str| {
                    request
                        .query
                        .iter()
                        .find(|(k, _)| k == name)
                        .and_then(|(_, v)| v.parse::<usize>().ok())
                };
                let size = param("size").unwrap_or(usize::MAX);
                let page = param("page").unwrap_or(0);
                let items = all
                    .into_iter()
                    .skip(page.saturating_mul(size))
                    .take(size)
                    .collect();
                ApiResponse::new(200, Some(Value::Array(items)))
            }
            (Method::Get, Some(id)) => match state.resources.get(resource).and_then(|r| r.get(&id))
            {
                Some(obj) => ApiResponse::new(200, Some(obj.clone())),
                None => ApiResponse::new(404, None),
            },
            (Method::Post, None) => {
                if body_id.is_some() {
                    return bad_request("A new entity cannot already have an ID");
                }
                let Some(mut body) = request.body.clone() else {
                    return bad_request("Missing body");
                };
                state.next_id += 1;
                let new_id = state.next_id;
                body["id"] = json!(new_id);
                state
                    .resources
                    .entry(resource.to_string())
                    .or_default()
                    .insert(new_id, body.clone());
                ApiResponse::new(201, Some(body))
            }
            (Method::Put | Method::Patch, Some(id)) => {
                match body_id {
                    None => return bad_request("Invalid id"),
                    Some(bid) if bid != id => return bad_request("Invalid ID"),
                    _ => (),
                }
                let Some(existing) = state
                    .resources
                    .get_mut(resource)
                    .and_then(|r| r.get_mut(&id))
                else {
                    return bad_request("Entity not found");
                };
                let body = request.body.clone().unwrap_or_default();
                if request.method == Method::Put {
                    *existing = body;
                } else if let (Some(target), Value::Object(changes)) =
                    (existing.as_object_mut(), body)
                {
                    merge(target, changes);
                }
                ApiResponse::new(200, Some(existing.clone()))
            }
            (Method::Delete, Some(id)) => {
                if let Some(r) = state.resources.get_mut(resource) {
                    r.remove(&id);
                }
                ApiResponse::new(204, None)
            }
            _ => ApiResponse::new(405, None),
        }
    }
}

fn merge(target: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (k, v) in changes {
        if !v.is_null() {
            target.insert(k, v);
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.lock().expect("poisoned lock");
        state.requests.push(request.clone());
        if let Some(status) = state.fail_with {
            return Ok(ApiResponse::new(
                status,
                Some(json!({ "title": "simulated failure" })),
            ));
        }
        Ok(Self::handle(&mut state, &request))
    }
}
