use super::data::*;

pub const COMPLETE_CLASS: &str = "complete";

pub fn todos_count(list: &List) -> usize {
    list.todos.len()
}

pub fn todos_remaining_count(list: &List) -> usize {
    list.todos.iter().filter(|todo| !todo.completed).count()
}

/// A list is complete once it has at least one todo and none are left open.
pub fn is_list_complete(list: &List) -> bool {
    todos_count(list) > 0 && todos_remaining_count(list) == 0
}

pub fn list_class(list: &List) -> Option<&'static str> {
    is_list_complete(list).then_some(COMPLETE_CLASS)
}

pub fn todo_class(todo: &Todo) -> Option<&'static str> {
    todo.completed.then_some(COMPLETE_CLASS)
}

/// Incomplete lists first, then complete ones. Input order is kept inside
/// each group.
pub fn sort_lists(lists: &[List]) -> impl Iterator<Item = &List> {
    let incomplete = lists.iter().filter(|list| !is_list_complete(list));
    let complete = lists.iter().filter(|list| is_list_complete(list));

    incomplete.chain(complete)
}

pub fn sort_todos(todos: &[Todo]) -> impl Iterator<Item = &Todo> {
    let incomplete = todos.iter().filter(|todo| !todo.completed);
    let complete = todos.iter().filter(|todo| todo.completed);

    incomplete.chain(complete)
}

/// One past the largest id among siblings, so the id of a deleted last
/// element is handed out again.
pub fn next_element_id(ids: impl IntoIterator<Item = i64>) -> i64 {
    ids.into_iter().max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list_with(id: ListID, statuses: &[bool]) -> List {
        let mut list = List::new(id, format!("list {}", id));
        for (index, completed) in statuses.iter().enumerate() {
            let mut todo = Todo::new(index as TodoID + 1, format!("todo {}", index));
            todo.completed = *completed;
            list.todos.push(todo);
        }
        list
    }

    #[test]
    fn empty_list_is_never_complete() {
        let list = list_with(1, &[]);
        assert!(!is_list_complete(&list));
        assert_eq!(list_class(&list), None);
    }

    #[test]
    fn errands_become_complete_when_last_todo_is_done() {
        let mut errands = list_with(1, &[true, false]);
        assert!(!is_list_complete(&errands));
        assert_eq!(todos_remaining_count(&errands), 1);

        errands.todos[1].completed = true;
        assert!(is_list_complete(&errands));
        assert_eq!(list_class(&errands), Some("complete"));
    }

    #[test]
    fn todo_class_follows_completion() {
        let mut todo = Todo::new(1, "milk");
        assert_eq!(todo_class(&todo), None);
        todo.completed = true;
        assert_eq!(todo_class(&todo), Some("complete"));
    }

    #[test]
    fn next_id_starts_at_one_and_reuses_the_top_id() {
        assert_eq!(next_element_id(Vec::<i64>::new()), 1);
        assert_eq!(next_element_id([1, 2, 3]), 4);
        assert_eq!(next_element_id([1, 2]), 3);
        assert_eq!(next_element_id([7, 2]), 8);
    }

    #[test]
    fn sort_lists_puts_complete_lists_last() {
        let lists = vec![list_with(1, &[true]), list_with(2, &[]), list_with(3, &[false])];
        let ids: Vec<ListID> = sort_lists(&lists).map(|list| list.id).collect();

        assert_eq!(ids, vec![2, 3, 1]);
    }

    proptest! {
        #[test]
        fn sort_todos_is_a_stable_partition(statuses in prop::collection::vec(any::<bool>(), 0..40)) {
            let list = list_with(1, &statuses);
            let sorted: Vec<&Todo> = sort_todos(&list.todos).collect();

            prop_assert_eq!(sorted.len(), list.todos.len());

            let split = sorted.iter().take_while(|todo| !todo.completed).count();
            prop_assert!(sorted[split..].iter().all(|todo| todo.completed));

            // ids were assigned in input order, so each group must stay ascending
            prop_assert!(sorted[..split].windows(2).all(|pair| pair[0].id < pair[1].id));
            prop_assert!(sorted[split..].windows(2).all(|pair| pair[0].id < pair[1].id));
        }

        #[test]
        fn sort_lists_is_a_stable_partition(shapes in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..4), 0..20)) {
            let lists: Vec<List> = shapes
                .iter()
                .enumerate()
                .map(|(index, statuses)| list_with(index as ListID + 1, statuses))
                .collect();
            let sorted: Vec<&List> = sort_lists(&lists).collect();

            let split = sorted.iter().take_while(|list| !is_list_complete(list)).count();
            prop_assert!(sorted[split..].iter().all(|list| is_list_complete(list)));
            prop_assert!(sorted[..split].windows(2).all(|pair| pair[0].id < pair[1].id));
            prop_assert!(sorted[split..].windows(2).all(|pair| pair[0].id < pair[1].id));
        }

        #[test]
        fn next_id_is_one_past_the_max(ids in prop::collection::vec(1i64..10_000, 0..30)) {
            let expected = ids.iter().copied().max().map_or(1, |max| max + 1);
            prop_assert_eq!(next_element_id(ids), expected);
        }
    }
}
