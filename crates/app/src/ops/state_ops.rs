//! State operations — latest state and recorded history of a target.

use serde::Deserialize;
use thingif_domain::error::ThingIfError;
use thingif_domain::id::TypedId;
use thingif_domain::query::QueryResult;
use thingif_domain::state::{
    AliasState, GroupedHistoryStates, HistoryState, QueryGroupedHistoryStatesRequest,
    QueryHistoryStatesRequest, STATE_HISTORY_NOT_AVAILABLE, TargetState,
};

use super::base::{BaseOp, require, segment};
use crate::ports::{HttpTransport, Method};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryPage {
    #[serde(default)]
    results: Vec<HistoryState>,
    next_pagination_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupedHistoryPage {
    #[serde(default)]
    grouped_results: Vec<GroupedHistoryStates>,
}

fn is_history_unavailable(err: &ThingIfError) -> bool {
    matches!(
        err,
        ThingIfError::Http(http)
            if http.status == 409 && http.has_error_code(STATE_HISTORY_NOT_AVAILABLE)
    )
}

pub struct StateOps<'a, T> {
    base: BaseOp<'a, T>,
    target: &'a TypedId,
}

impl<'a, T: HttpTransport> StateOps<'a, T> {
    #[must_use]
    pub fn new(base: BaseOp<'a, T>, target: &'a TypedId) -> Self {
        Self { base, target }
    }

    fn states_url(&self) -> String {
        let target = self.target.to_string();
        self.base
            .thing_if_url(&format!("/targets/{}/states", segment(&target)))
    }

    fn alias_url(&self, alias: &str) -> String {
        format!("{}/aliases/{}", self.states_url(), segment(alias))
    }

    /// Latest state of every alias of the target.
    ///
    /// # Errors
    ///
    /// Returns the HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(target = %self.target))]
    pub async fn get_state(&self) -> Result<TargetState, ThingIfError> {
        let request = self.base.request(Method::Get, self.states_url());
        self.base.execute_json(request).await
    }

    /// Latest state of one alias.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when `alias` is empty, or the
    /// HTTP/decode error of the request.
    #[tracing::instrument(skip(self), fields(target = %self.target))]
    pub async fn get_state_by_alias(&self, alias: &str) -> Result<AliasState, ThingIfError> {
        require(alias, "alias")?;
        let request = self.base.request(Method::Get, self.alias_url(alias));
        self.base.execute_json(request).await
    }

    /// One page of recorded states matching the query. A target without
    /// recorded history yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when the alias is empty, or the
    /// HTTP/decode error of the request.
    #[tracing::instrument(
        skip(self, request),
        fields(target = %self.target, alias = %request.alias)
    )]
    pub async fn query_history_states(
        &self,
        request: &QueryHistoryStatesRequest,
    ) -> Result<QueryResult<HistoryState>, ThingIfError> {
        request.validate()?;
        let http = self.base.json_request(
            Method::Post,
            format!("{}/query", self.alias_url(&request.alias)),
            QueryHistoryStatesRequest::MEDIA_TYPE,
            request,
        )?;
        match self.base.execute_json::<HistoryPage>(http).await {
            Ok(page) => Ok(QueryResult::new(page.results, page.next_pagination_key)),
            Err(err) if is_history_unavailable(&err) => {
                tracing::debug!("no state history recorded");
                Ok(QueryResult::empty())
            }
            Err(err) => Err(err),
        }
    }

    /// Recorded states matching the query, bucketed by the target's data
    /// grouping interval. A target without recorded history yields no bucket.
    ///
    /// # Errors
    ///
    /// Returns [`ThingIfError::Argument`] when the alias is empty, or the
    /// HTTP/decode error of the request.
    #[tracing::instrument(
        skip(self, request),
        fields(target = %self.target, alias = %request.alias)
    )]
    pub async fn query_grouped_history_states(
        &self,
        request: &QueryGroupedHistoryStatesRequest,
    ) -> Result<Vec<GroupedHistoryStates>, ThingIfError> {
        request.validate()?;
        let http = self.base.json_request(
            Method::Post,
            format!("{}/query", self.alias_url(&request.alias)),
            QueryHistoryStatesRequest::MEDIA_TYPE,
            request,
        )?;
        match self.base.execute_json::<GroupedHistoryPage>(http).await {
            Ok(page) => Ok(page.grouped_results),
            Err(err) if is_history_unavailable(&err) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}
