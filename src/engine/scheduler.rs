#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
    frame: u64,
}

impl FrameTicket {
    pub fn frame(self) -> u64 {
        self.frame
    }
}

/// At most one frame is pending at a time. `stop` and `invalidate` bump the
/// generation, so tickets handed out earlier are refused by `accept`.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    generation: u64,
    next_frame: u64,
    pending: Option<FrameTicket>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.invalidate();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    pub fn request_frame(&mut self) -> Option<FrameTicket> {
        if !self.running {
            return None;
        }
        if let Some(ticket) = self.pending {
            return Some(ticket);
        }

        let ticket = FrameTicket {
            generation: self.generation,
            frame: self.next_frame,
        };
        self.next_frame = self.next_frame.wrapping_add(1);
        self.pending = Some(ticket);
        Some(ticket)
    }

    pub fn accept(&mut self, ticket: FrameTicket) -> bool {
        if !self.running || ticket.generation != self.generation || self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_scheduler_issues_nothing() {
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.is_running());
        assert!(scheduler.request_frame().is_none());
    }

    #[test]
    fn requests_coalesce_into_one_pending_frame() {
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        let first = scheduler.request_frame().unwrap();
        assert_eq!(scheduler.request_frame(), Some(first));
        assert!(scheduler.accept(first));
        assert!(!scheduler.accept(first));

        let second = scheduler.request_frame().unwrap();
        assert_eq!(second.frame(), first.frame() + 1);
    }

    #[test]
    fn stop_cancels_queued_ticket() {
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        let queued = scheduler.request_frame().unwrap();
        scheduler.stop();
        assert!(scheduler.pending().is_none());
        assert!(!scheduler.accept(queued));

        scheduler.start();
        assert!(!scheduler.accept(queued));
    }

    #[test]
    fn invalidate_refuses_tickets_from_before_a_rebuild() {
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        let stale = scheduler.request_frame().unwrap();
        scheduler.invalidate();
        assert!(scheduler.is_running());
        assert!(!scheduler.accept(stale));
        let fresh = scheduler.request_frame().unwrap();
        assert!(scheduler.accept(fresh));
    }
}
