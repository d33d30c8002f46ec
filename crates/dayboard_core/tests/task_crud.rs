use dayboard_core::{
    InMemoryTaskRepository, RepoError, RepoResult, Task, TaskRepository, TaskService,
    TaskServiceError,
};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use uuid::Uuid;

/// Repository whose saves can be switched to fail, for commit-atomicity
/// checks.
struct FlakyRepository {
    inner: InMemoryTaskRepository,
    fail_saves: Rc<Cell<bool>>,
}

impl FlakyRepository {
    fn new() -> Self {
        Self {
            inner: InMemoryTaskRepository::new(),
            fail_saves: Rc::new(Cell::new(false)),
        }
    }
}

impl TaskRepository for FlakyRepository {
    fn load(&self) -> RepoResult<Option<Vec<Task>>> {
        self.inner.load()
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::Io(io::Error::other("storage unavailable")));
        }
        self.inner.save(tasks)
    }
}

#[test]
fn load_of_absent_slot_yields_empty_collection() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    assert_eq!(service.load().unwrap(), 0);
    assert!(service.tasks().is_empty());
}

#[test]
fn add_appends_uncompleted_task_with_trimmed_text() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    service.add("first").unwrap();

    let id = service.add("  Buy milk  ").unwrap();

    let tasks = service.tasks();
    assert_eq!(tasks.len(), 2);
    let last = tasks.last().unwrap();
    assert_eq!(last.id, id);
    assert_eq!(last.text, "Buy milk");
    assert!(!last.completed);
}

#[test]
fn add_rejects_whitespace_only_text() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    let err = service.add("  ").unwrap_err();

    assert!(matches!(err, TaskServiceError::Validation(_)));
    assert!(service.tasks().is_empty());
}

#[test]
fn toggle_twice_restores_original_flag() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    let id = service.add("water plants").unwrap();

    assert!(service.toggle_completed(id).unwrap());
    assert!(!service.toggle_completed(id).unwrap());
    assert!(!service.tasks()[0].completed);
}

#[test]
fn edit_preserves_id_and_position() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    service.add("one").unwrap();
    let id = service.add("two").unwrap();
    service.add("three").unwrap();

    service.edit(id, "  two, revised  ").unwrap();

    let tasks = service.tasks();
    assert_eq!(tasks[1].id, id);
    assert_eq!(tasks[1].text, "two, revised");
    assert_eq!(tasks[0].text, "one");
    assert_eq!(tasks[2].text, "three");
}

#[test]
fn edit_rejects_empty_text_and_leaves_task_untouched() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    let id = service.add("keep me").unwrap();

    let err = service.edit(id, "   ").unwrap_err();
    assert!(matches!(err, TaskServiceError::Validation(_)));
    assert_eq!(service.tasks()[0].text, "keep me");
}

#[test]
fn remove_deletes_exactly_the_matching_task() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    service.add("one").unwrap();
    let id = service.add("two").unwrap();
    service.add("three").unwrap();

    let removed = service.remove(id).unwrap();

    assert_eq!(removed.id, id);
    assert_eq!(service.tasks().len(), 2);
    assert!(service.tasks().iter().all(|task| task.id != id));
}

#[test]
fn operations_on_unknown_id_report_not_found() {
    let mut service = TaskService::new(InMemoryTaskRepository::new());
    service.add("only").unwrap();
    let unknown = Uuid::new_v4();

    for err in [
        service.toggle_completed(unknown).unwrap_err(),
        service.edit(unknown, "text").unwrap_err(),
        service.remove(unknown).unwrap_err(),
    ] {
        assert!(matches!(err, TaskServiceError::TaskNotFound(id) if id == unknown));
    }
    assert_eq!(service.tasks().len(), 1);
}

#[test]
fn failed_persistence_leaves_in_memory_state_intact() {
    let repo = FlakyRepository::new();
    let fail_saves = Rc::clone(&repo.fail_saves);
    let mut service = TaskService::new(repo);
    let id = service.add("committed").unwrap();

    fail_saves.set(true);

    let err = service.add("never committed").unwrap_err();
    assert!(matches!(err, TaskServiceError::Repo(RepoError::Io(_))));
    assert_eq!(service.tasks().len(), 1);

    let err = service.toggle_completed(id).unwrap_err();
    assert!(matches!(err, TaskServiceError::Repo(_)));
    assert!(!service.tasks()[0].completed);

    let err = service.remove(id).unwrap_err();
    assert!(matches!(err, TaskServiceError::Repo(_)));
    assert_eq!(service.tasks().len(), 1);
}

#[test]
fn malformed_snapshot_is_reported_not_swallowed() {
    let mut service = TaskService::new(InMemoryTaskRepository::with_contents("not json"));
    let err = service.load().unwrap_err();
    assert!(matches!(err, TaskServiceError::Repo(RepoError::Malformed(_))));
}

#[test]
fn snapshot_with_duplicate_ids_is_rejected() {
    let id = Uuid::new_v4();
    let raw = format!(
        r#"[{{"id":"{id}","text":"a","completed":false}},{{"id":"{id}","text":"b","completed":true}}]"#
    );
    let mut service = TaskService::new(InMemoryTaskRepository::with_contents(raw));

    let err = service.load().unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Repo(RepoError::DuplicateId(dup)) if dup == id
    ));
}

#[test]
fn in_memory_round_trip_preserves_order_and_flags() {
    let repo = InMemoryTaskRepository::new();
    {
        let mut service = TaskService::new(&repo);
        service.add("one").unwrap();
        let id = service.add("two").unwrap();
        service.add("three").unwrap();
        service.toggle_completed(id).unwrap();
    }

    let mut reloaded = TaskService::new(&repo);
    assert_eq!(reloaded.load().unwrap(), 3);
    let texts: Vec<_> = reloaded.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["one", "two", "three"]);
    assert!(reloaded.tasks()[1].completed);
    assert!(!reloaded.tasks()[0].completed);
}
