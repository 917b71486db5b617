// ── Command table ─────────────────────────────────────────────────────────────
//
// Maps the 16-bit command word carried by WM_COMMAND to an application
// callback.  Generic over the context the callback receives so the table
// itself has no dependency on the controller or on Win32.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

/// Identifier of a user-triggerable command; doubles as the button's
/// control id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CommandId(pub(crate) u16);

impl CommandId {
    /// First id handed to application commands.
    pub(crate) const USER_BASE: u16 = 1000;

    /// `USER_BASE + offset`.
    pub(crate) const fn user(offset: u16) -> Self {
        Self(Self::USER_BASE + offset)
    }

    /// Built-in child controls are created with control id 0, so 0 never
    /// names an application command.
    pub(crate) fn is_reserved(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered command handler.
///
/// Shared and interior-mutable so the dispatcher can release its borrow of
/// the table before handing the context to the callback.
pub(crate) type Callback<C> = Rc<RefCell<dyn FnMut(&mut C)>>;

/// `CommandId -> callback`, filled at setup time and never shrunk.
pub(crate) struct CommandTable<C> {
    entries: HashMap<CommandId, Callback<C>>,
}

impl<C> CommandTable<C> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `callback` under `id`, returning `true` if it replaced an
    /// earlier registration.
    pub(crate) fn insert<F>(&mut self, id: CommandId, callback: F) -> bool
    where
        F: FnMut(&mut C) + 'static,
    {
        let callback: Callback<C> = Rc::new(RefCell::new(callback));
        self.entries.insert(id, callback).is_some()
    }

    /// A handle to the callback for `id`, if any.
    pub(crate) fn get(&self, id: CommandId) -> Option<Callback<C>> {
        self.entries.get(&id).cloned()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: CommandId) -> bool {
        self.entries.contains_key(&id)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    fn run(table: &CommandTable<Log>, id: CommandId, ctx: &mut Log) -> bool {
        match table.get(id) {
            Some(cb) => {
                (&mut *cb.borrow_mut())(ctx);
                true
            }
            None => false,
        }
    }

    #[test]
    fn registered_command_runs_its_callback() {
        let mut table = CommandTable::new();
        table.insert(CommandId(1001), |log: &mut Log| log.0.push("a"));
        let mut log = Log::default();
        assert!(run(&table, CommandId(1001), &mut log));
        assert_eq!(log.0, ["a"]);
    }

    #[test]
    fn reregistering_overwrites() {
        let mut table = CommandTable::new();
        assert!(!table.insert(CommandId(7), |log: &mut Log| log.0.push("old")));
        assert!(table.insert(CommandId(7), |log: &mut Log| log.0.push("new")));
        assert_eq!(table.len(), 1);

        let mut log = Log::default();
        run(&table, CommandId(7), &mut log);
        assert_eq!(log.0, ["new"]);
    }

    #[test]
    fn unknown_command_is_not_found() {
        let table: CommandTable<Log> = CommandTable::new();
        let mut log = Log::default();
        assert!(!run(&table, CommandId(42), &mut log));
        assert!(log.0.is_empty());
        assert!(!table.contains(CommandId(42)));
    }

    #[test]
    fn callbacks_keep_their_own_state() {
        let mut table = CommandTable::new();
        let mut n = 0;
        table.insert(CommandId::user(1), move |log: &mut Log| {
            n += 1;
            if n == 2 {
                log.0.push("second");
            }
        });
        let mut log = Log::default();
        run(&table, CommandId(1001), &mut log);
        run(&table, CommandId(1001), &mut log);
        assert_eq!(log.0, ["second"]);
    }

    #[test]
    fn zero_is_reserved() {
        assert!(CommandId(0).is_reserved());
        assert!(!CommandId::user(0).is_reserved());
        assert_eq!(CommandId::user(3), CommandId(1003));
    }
}
