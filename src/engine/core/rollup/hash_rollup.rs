use std::collections::VecDeque;
use std::collections::hash_map::{Entry, HashMap};

use ahash::RandomState as AHashRandomState;
use tracing::{debug, warn};

use crate::engine::core::metrics::BoxedMetric;
use crate::engine::core::stream::{
    BoxedStream, StreamComparator, StreamContext, StreamNodeId, TupleStream,
};
use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

use super::bucket::Bucket;
use super::group_key::GroupKey;

type GroupMap = HashMap<GroupKey, Vec<BoxedMetric>, AHashRandomState>;

enum RollupState {
    Unopened,
    /// Opened; the first read drains upstream.
    Pending,
    /// Group tuples not yet handed out. The upstream EOF tuple is last.
    Emitting(VecDeque<Tuple>),
    Aborted,
    Closed,
}

/// Groups every upstream tuple by its bucket values and emits one tuple per
/// group carrying the bucket fields and each metric's value.
///
/// Nothing is computed on `open`. The first `read` drains upstream to its EOF
/// tuple and builds the whole result in memory; later reads hand it out. Group
/// order follows the hash map and is not stable between runs.
pub struct HashRollupStream {
    upstream: BoxedStream,
    buckets: Vec<Bucket>,
    metrics: Vec<BoxedMetric>,
    group_limit: Option<usize>,
    node_id: StreamNodeId,
    state: RollupState,
}

impl HashRollupStream {
    pub fn new(upstream: BoxedStream, buckets: Vec<Bucket>, metrics: Vec<BoxedMetric>) -> Self {
        Self {
            upstream,
            buckets,
            metrics,
            group_limit: None,
            node_id: StreamNodeId::random(),
            state: RollupState::Unopened,
        }
    }

    /// Fails the drain once more than `limit` distinct groups appear.
    pub fn with_group_limit(mut self, limit: Option<usize>) -> Self {
        self.group_limit = limit;
        self
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn metrics(&self) -> &[BoxedMetric] {
        &self.metrics
    }

    pub fn group_limit(&self) -> Option<usize> {
        self.group_limit
    }

    pub(super) fn upstream(&self) -> &BoxedStream {
        &self.upstream
    }

    fn describe(&self) -> String {
        format!("hashRollup {}", self.node_id)
    }

    /// Reads upstream to its EOF tuple and builds the output queue.
    fn drain(&mut self) -> Result<VecDeque<Tuple>, StreamError> {
        let mut groups: GroupMap = HashMap::with_hasher(AHashRandomState::new());
        let mut consumed = 0usize;

        loop {
            let tuple = self.upstream.read()?;
            if tuple.is_eof() {
                debug!(
                    target: "snel_stream::rollup",
                    node = %self.node_id,
                    tuples = consumed,
                    groups = groups.len(),
                    "upstream drained"
                );
                return self.finish(groups, tuple);
            }
            consumed += 1;

            let key = GroupKey::from_tuple(&self.buckets, &tuple);
            let group_count = groups.len();
            match groups.entry(key) {
                Entry::Occupied(mut entry) => {
                    for metric in entry.get_mut().iter_mut() {
                        metric.update(&tuple)?;
                    }
                }
                Entry::Vacant(entry) => {
                    if let Some(limit) = self.group_limit {
                        if group_count >= limit {
                            return Err(StreamError::GroupLimitExceeded { limit });
                        }
                    }
                    let mut fresh: Vec<BoxedMetric> =
                        self.metrics.iter().map(|m| m.spawn_fresh()).collect();
                    for metric in fresh.iter_mut() {
                        metric.update(&tuple)?;
                    }
                    entry.insert(fresh);
                }
            }
        }
    }

    fn finish(&self, groups: GroupMap, eof: Tuple) -> Result<VecDeque<Tuple>, StreamError> {
        let mut output = VecDeque::with_capacity(groups.len() + 1);
        for (key, metrics) in groups {
            let mut tuple = Tuple::new();
            for metric in &metrics {
                tuple.put(metric.identifier(), metric.current_value()?);
            }
            for (bucket, part) in self.buckets.iter().zip(key.parts()) {
                tuple.put(bucket.field(), part.to_json());
            }
            output.push_back(tuple);
        }
        output.push_back(eof);
        Ok(output)
    }
}

impl TupleStream for HashRollupStream {
    fn open(&mut self) -> Result<(), StreamError> {
        self.state = RollupState::Unopened;
        self.upstream.open()?;
        self.state = RollupState::Pending;
        Ok(())
    }

    fn read(&mut self) -> Result<Tuple, StreamError> {
        if let RollupState::Pending = self.state {
            match self.drain() {
                Ok(output) => self.state = RollupState::Emitting(output),
                Err(e) => {
                    warn!(target: "snel_stream::rollup", node = %self.node_id, "rollup aborted during drain");
                    e.log_error();
                    self.state = RollupState::Aborted;
                    return Err(e);
                }
            }
        }

        if let RollupState::Emitting(output) = &mut self.state {
            // Past the EOF tuple every read yields another EOF tuple.
            return Ok(output.pop_front().unwrap_or_else(Tuple::eof));
        }

        if matches!(self.state, RollupState::Aborted) {
            Err(StreamError::Aborted(self.describe()))
        } else {
            Err(StreamError::NotOpen(self.describe()))
        }
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.state = RollupState::Closed;
        self.upstream.close()
    }

    fn children(&self) -> Vec<&dyn TupleStream> {
        vec![self.upstream.as_ref()]
    }

    /// Hash regrouping does not keep any upstream order.
    fn stream_sort(&self) -> Option<StreamComparator> {
        None
    }

    fn cost(&self) -> i32 {
        0
    }

    fn set_stream_context(&mut self, context: &StreamContext) {
        self.upstream.set_stream_context(context);
    }

    fn node_id(&self) -> StreamNodeId {
        self.node_id
    }
}
