pub mod notifications;
pub mod shader_list;
