use super::types::Notification;
use std::any::Any;

/// 通知接收端。核心只负责发出，不关心是否有人在听。
pub trait NotificationSink: Any {
    fn handle(&mut self, notification: &Notification);

    fn as_any(&self) -> &dyn Any;
}

/// 丢弃所有通知。
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl NotificationSink for Discard {
    fn handle(&mut self, _notification: &Notification) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 一个简单的通知收集器（存内存，结束后可写成 JSON 文件）
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    pub events: Vec<Notification>,
}

impl NotificationLog {
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl NotificationSink for NotificationLog {
    fn handle(&mut self, notification: &Notification) {
        self.events.push(notification.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 把每条通知转发给多个接收端。
#[derive(Default)]
pub struct Broadcast {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl Broadcast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl NotificationSink) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// 找到第一个类型为 `T` 的接收端。
    pub fn find<T: NotificationSink>(&self) -> Option<&T> {
        self.sinks
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }
}

impl NotificationSink for Broadcast {
    fn handle(&mut self, notification: &Notification) {
        for sink in &mut self.sinks {
            sink.handle(notification);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
