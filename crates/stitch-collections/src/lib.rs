pub mod shadow_list;

pub type ImVec<T> = imbl::Vector<T>;

pub use shadow_list::ImShadowList;
