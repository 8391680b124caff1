use std::future::Future;

use tokio::task::JoinSet;

use crate::TaskClass;

/// Tagged wrapper around a Tokio [`JoinSet`].
///
/// Spawns are routed through the worker runtime handle so a set created
/// outside a runtime still has somewhere to run.
#[derive(Debug)]
pub struct WorkerJoinSet<T> {
	class: TaskClass,
	inner: JoinSet<T>,
}

impl<T> WorkerJoinSet<T>
where
	T: Send + 'static,
{
	/// Creates an empty join set for the given task class.
	pub fn new(class: TaskClass) -> Self {
		Self { class, inner: JoinSet::new() }
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Spawns a future into the set on the worker runtime handle.
	pub fn spawn<F>(&mut self, fut: F)
	where
		F: Future<Output = T> + Send + 'static,
	{
		tracing::trace!(worker_class = self.class.as_str(), pending = self.inner.len(), "worker.join_set.spawn");
		let handle = crate::spawn::runtime_handle();
		let _guard = handle.enter();
		self.inner.spawn(fut);
	}

	/// Waits for every task in the set, returning outputs in completion order.
	///
	/// Panicked or cancelled tasks are logged and skipped.
	pub async fn join_all(mut self) -> Vec<T> {
		let mut out = Vec::with_capacity(self.inner.len());
		while let Some(res) = self.inner.join_next().await {
			match res {
				Ok(value) => out.push(value),
				Err(error) => {
					tracing::warn!(worker_class = self.class.as_str(), %error, "worker.join_set.task_failed");
				}
			}
		}
		out
	}
}
