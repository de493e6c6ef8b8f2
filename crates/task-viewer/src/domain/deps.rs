//! Dependency domain facade: graph checks and the critical-path timeline.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::entities::Task;

/// A dependency id that does not resolve to any loaded task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingDep {
    pub task_id: String,
    pub dep_id: String,
}

/// One task on the critical path, with its scheduled window in hours
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub task_id: String,
    pub hours: f64,
    pub start: f64,
    pub finish: f64,
}

/// A task off the critical path that can run next to it
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelTask {
    pub task_id: String,
    /// Hours taken off the serial total by running this task in parallel
    pub hours: f64,
    /// Critical-path tasks whose window overlaps this task's window
    pub alongside: Vec<String>,
}

/// Outcome of scheduling an acyclic dependency graph
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPath {
    pub steps: Vec<PathStep>,
    pub parallel: Vec<ParallelTask>,
    /// Length of the critical path, i.e. the parallel-optimised duration
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    Acyclic(CriticalPath),
    /// The graph has cycles, so no schedule exists
    Cyclic { cycles: Vec<Vec<String>> },
}

/// Full timeline report over the loaded tasks
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Sum of every task's estimate, i.e. one task at a time
    pub serial_hours: f64,
    pub dangling: Vec<DanglingDep>,
    pub schedule: Schedule,
}

/// Dependency graph over the task list.
///
/// Every task is a node, addressed by its position in the list. Dependency
/// ids resolve to the first task carrying that id; ids that resolve nowhere
/// are reported and otherwise ignored.
pub struct DependencyDomain<'a> {
    tasks: &'a [Task],
    /// Resolved prerequisites per node, deduplicated, in declaration order
    preds: Vec<Vec<usize>>,
    dangling: Vec<DanglingDep>,
}

impl<'a> DependencyDomain<'a> {
    /// Build the dependency graph
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, task) in tasks.iter().enumerate() {
            if let Some(id) = task.id.as_deref() {
                index.entry(id).or_insert(i);
            }
        }

        let mut preds = Vec::with_capacity(tasks.len());
        let mut dangling = Vec::new();
        for task in tasks {
            let mut resolved: Vec<usize> = Vec::new();
            for dep in &task.intelligent_dependencies {
                match index.get(dep.as_str()) {
                    Some(&j) if !resolved.contains(&j) => resolved.push(j),
                    Some(_) => {}
                    None => dangling.push(DanglingDep {
                        task_id: task.display_id().to_string(),
                        dep_id: dep.clone(),
                    }),
                }
            }
            preds.push(resolved);
        }

        for dep in &dangling {
            warn!(
                "Task {} depends on unknown task {}; ignoring it for scheduling",
                dep.task_id, dep.dep_id
            );
        }

        Self {
            tasks,
            preds,
            dangling,
        }
    }

    /// Dependencies that point at no loaded task
    pub fn dangling(&self) -> &[DanglingDep] {
        &self.dangling
    }

    /// Find all cycles in the dependency graph.
    ///
    /// Depth-first with an explicit stack, so chain length is bounded by
    /// memory rather than the thread's call stack.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = Vec::new();
        let mut visited = vec![false; self.tasks.len()];
        let mut on_path = vec![false; self.tasks.len()];

        for root in 0..self.tasks.len() {
            if visited[root] {
                continue;
            }

            // (node, index of the next prerequisite to follow)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            visited[root] = true;
            on_path[root] = true;

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let Some(&dep) = self.preds[node].get(next) else {
                    on_path[node] = false;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                if !visited[dep] {
                    visited[dep] = true;
                    on_path[dep] = true;
                    stack.push((dep, 0));
                } else if on_path[dep] {
                    if let Some(cycle_start) = stack.iter().position(|&(n, _)| n == dep) {
                        let cycle: Vec<String> = stack[cycle_start..]
                            .iter()
                            .map(|&(n, _)| self.tasks[n].display_id().to_string())
                            .collect();
                        if !cycles.contains(&cycle) {
                            cycles.push(cycle);
                        }
                    }
                }
            }
        }

        cycles
    }

    /// Topological order (Kahn), ties broken by list position.
    /// Returns `None` when the graph has a cycle.
    fn topological_order(&self) -> Option<Vec<usize>> {
        let n = self.tasks.len();
        let mut in_degree: Vec<usize> = self.preds.iter().map(Vec::len).collect();
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (node, preds) in self.preds.iter().enumerate() {
            for &p in preds {
                dependents[p].push(node);
            }
        }

        let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(node) = ready.pop_first() {
            order.push(node);
            for &next in &dependents[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.insert(next);
                }
            }
        }

        (order.len() == n).then_some(order)
    }

    /// Longest path through the graph, weighting each task by its hours
    pub fn critical_path(&self) -> Option<CriticalPath> {
        let order = self.topological_order()?;
        let n = self.tasks.len();
        let mut finish = vec![0.0_f64; n];
        let mut via: Vec<Option<usize>> = vec![None; n];

        for &node in &order {
            let mut earliest_start = 0.0_f64;
            for &p in &self.preds[node] {
                if via[node].is_none() || finish[p] > earliest_start {
                    earliest_start = finish[p];
                    via[node] = Some(p);
                }
            }
            finish[node] = earliest_start + self.tasks[node].hours();
        }

        let mut end = None;
        for node in 0..n {
            if end.map_or(true, |e: usize| finish[node] > finish[e]) {
                end = Some(node);
            }
        }

        let mut on_path = vec![false; n];
        let mut chain = Vec::new();
        let mut cursor = end;
        while let Some(node) = cursor {
            on_path[node] = true;
            chain.push(node);
            cursor = via[node];
        }
        chain.reverse();

        let steps: Vec<PathStep> = chain
            .iter()
            .map(|&node| {
                let hours = self.tasks[node].hours();
                PathStep {
                    task_id: self.tasks[node].display_id().to_string(),
                    hours,
                    start: finish[node] - hours,
                    finish: finish[node],
                }
            })
            .collect();

        let parallel = (0..n)
            .filter(|&node| !on_path[node])
            .map(|node| {
                let hours = self.tasks[node].hours();
                let start = finish[node] - hours;
                let alongside = steps
                    .iter()
                    .filter(|step| start < step.finish && step.start < finish[node])
                    .map(|step| step.task_id.clone())
                    .collect();
                ParallelTask {
                    task_id: self.tasks[node].display_id().to_string(),
                    hours,
                    alongside,
                }
            })
            .collect();

        let total_hours = end.map_or(0.0, |e| finish[e]);
        debug!(
            "Critical path has {} step(s), {} hour(s)",
            steps.len(),
            total_hours
        );

        Some(CriticalPath {
            steps,
            parallel,
            total_hours,
        })
    }

    /// Serial and parallel durations plus the critical path
    pub fn timeline(&self) -> Timeline {
        let serial_hours = self.tasks.iter().map(Task::hours).sum();
        let schedule = match self.critical_path() {
            Some(path) => Schedule::Acyclic(path),
            None => Schedule::Cyclic {
                cycles: self.find_cycles(),
            },
        };

        Timeline {
            serial_hours,
            dangling: self.dangling.clone(),
            schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, hours: f64, deps: &[&str]) -> Task {
        let mut task = Task::new(id, id);
        task.estimated_hours = Some(hours);
        task.intelligent_dependencies = deps.iter().map(|d| (*d).to_string()).collect();
        task
    }

    fn path_ids(path: &CriticalPath) -> Vec<&str> {
        path.steps.iter().map(|s| s.task_id.as_str()).collect()
    }

    fn ast_pipeline() -> Vec<Task> {
        vec![
            task("TM_AST_001", 24.0, &[]),
            task("TM_AST_002", 32.0, &["TM_AST_001"]),
            task("TM_AST_003", 28.0, &["TM_AST_002"]),
            task("TM_AST_004", 24.0, &["TM_AST_002"]),
            task("TM_AST_005", 20.0, &["TM_AST_003", "TM_AST_004"]),
            task("TM_AST_006", 28.0, &["TM_AST_005"]),
        ]
    }

    #[test]
    fn test_critical_path_through_pipeline() {
        let tasks = ast_pipeline();
        let timeline = DependencyDomain::new(&tasks).timeline();

        assert_eq!(timeline.serial_hours, 156.0);
        let Schedule::Acyclic(path) = timeline.schedule else {
            panic!("expected an acyclic schedule");
        };
        assert_eq!(
            path_ids(&path),
            vec!["TM_AST_001", "TM_AST_002", "TM_AST_003", "TM_AST_005", "TM_AST_006"]
        );
        assert_eq!(path.total_hours, 132.0);

        assert_eq!(path.parallel.len(), 1);
        assert_eq!(path.parallel[0].task_id, "TM_AST_004");
        assert_eq!(path.parallel[0].hours, 24.0);
        assert_eq!(path.parallel[0].alongside, vec!["TM_AST_003".to_string()]);
    }

    #[test]
    fn test_parallel_savings_add_up() {
        let tasks = ast_pipeline();
        let timeline = DependencyDomain::new(&tasks).timeline();
        let Schedule::Acyclic(path) = timeline.schedule else {
            panic!("expected an acyclic schedule");
        };
        let saved: f64 = path.parallel.iter().map(|p| p.hours).sum();
        assert_eq!(timeline.serial_hours - path.total_hours, saved);
    }

    #[test]
    fn test_independent_tasks_pick_longest() {
        let tasks = vec![task("A", 5.0, &[]), task("B", 9.0, &[]), task("C", 9.0, &[])];
        let path = DependencyDomain::new(&tasks).critical_path().unwrap();
        assert_eq!(path_ids(&path), vec!["B"]);
        assert_eq!(path.total_hours, 9.0);
        assert_eq!(path.parallel.len(), 2);
    }

    #[test]
    fn test_dependency_declared_after_dependent() {
        let tasks = vec![task("B", 3.0, &["A"]), task("A", 4.0, &[])];
        let path = DependencyDomain::new(&tasks).critical_path().unwrap();
        assert_eq!(path_ids(&path), vec!["A", "B"]);
        assert_eq!(path.steps[1].start, 4.0);
        assert_eq!(path.total_hours, 7.0);
    }

    #[test]
    fn test_dangling_dependencies_are_reported_and_ignored() {
        let tasks = vec![task("A", 2.0, &["GHOST"]), task("B", 3.0, &["A", "A"])];
        let domain = DependencyDomain::new(&tasks);
        assert_eq!(
            domain.dangling(),
            &[DanglingDep {
                task_id: "A".to_string(),
                dep_id: "GHOST".to_string(),
            }]
        );
        let path = domain.critical_path().unwrap();
        assert_eq!(path.total_hours, 5.0);
    }

    #[test]
    fn test_cycle_detection() {
        let tasks = vec![
            task("1", 1.0, &["2"]),
            task("2", 1.0, &["1"]),
            task("3", 1.0, &[]),
        ];
        let timeline = DependencyDomain::new(&tasks).timeline();
        assert_eq!(timeline.serial_hours, 3.0);
        match timeline.schedule {
            Schedule::Cyclic { cycles } => {
                assert_eq!(cycles.len(), 1);
                assert!(cycles[0].contains(&"1".to_string()));
                assert!(cycles[0].contains(&"2".to_string()));
            }
            Schedule::Acyclic(_) => panic!("expected a cycle"),
        }
    }

    #[test]
    fn test_long_dependency_ring() {
        let n = 200_000;
        let tasks: Vec<Task> = (0..n)
            .map(|i| {
                let prev = format!("R{}", (i + n - 1) % n);
                task(&format!("R{i}"), 1.0, &[prev.as_str()])
            })
            .collect();

        let timeline = DependencyDomain::new(&tasks).timeline();
        assert_eq!(timeline.serial_hours, n as f64);
        let Schedule::Cyclic { cycles } = timeline.schedule else {
            panic!("expected a cycle");
        };
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n);
    }

    #[test]
    fn test_long_chain_into_cycle() {
        let n = 100_000;
        let mut tasks: Vec<Task> = (0..n)
            .map(|i| {
                let next = format!("C{}", i + 1);
                task(&format!("C{i}"), 1.0, &[next.as_str()])
            })
            .collect();
        let last = format!("C{}", n - 1);
        tasks.push(task(&format!("C{n}"), 1.0, &[last.as_str()]));

        let cycles = DependencyDomain::new(&tasks).find_cycles();
        assert_eq!(cycles, vec![vec![last, format!("C{n}")]]);
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let tasks = vec![task("1", 1.0, &["1"])];
        let domain = DependencyDomain::new(&tasks);
        assert!(domain.critical_path().is_none());
        assert_eq!(domain.find_cycles(), vec![vec!["1".to_string()]]);
    }

    #[test]
    fn test_empty_list() {
        let timeline = DependencyDomain::new(&[]).timeline();
        assert_eq!(timeline.serial_hours, 0.0);
        let Schedule::Acyclic(path) = timeline.schedule else {
            panic!("expected an acyclic schedule");
        };
        assert!(path.steps.is_empty());
        assert_eq!(path.total_hours, 0.0);
    }
}
