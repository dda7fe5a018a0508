//! Canal de notificaciones de las bebidas que se estan sirviendo
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::warn;

/// Extremo productor. Cada servido tiene su propia copia.
#[derive(Clone)]
pub struct Notifier {
    sender: Sender<String>,
}

impl Notifier {
    /// Nunca bloquea: el canal no tiene limite.
    pub fn notify(&self, message: String) {
        if let Err(e) = self.sender.send(message) {
            warn!("[NOTIFICATIONS] Nobody is listening, dropped: {}", e.into_inner());
        }
    }
}

pub struct NotificationStream {
    sender: Sender<String>,
    receiver: Receiver<String>,
}

impl NotificationStream {
    pub fn new() -> NotificationStream {
        let (sender, receiver) = unbounded();
        NotificationStream { sender, receiver }
    }

    pub fn notifier(&self) -> Notifier {
        Notifier {
            sender: self.sender.clone(),
        }
    }

    /// Devuelve las notificaciones pendientes sin bloquear si no hay ninguna
    pub fn drain(&self) -> Vec<String> {
        self.receiver.try_iter().collect()
    }
}

impl Default for NotificationStream {
    fn default() -> Self {
        NotificationStream::new()
    }
}
