pub mod cart;
pub mod detail;
pub mod favorites;
pub mod page;
pub mod view;

pub use cart::{Cart, CartItem, InMemoryCart};
pub use detail::DetailViewModel;
pub use favorites::{Favorites, InMemoryFavorites};
pub use page::{EventDisposition, PageController, PagePhase, PageSettings, Ticket};
pub use view::{PageView, ProductDetailView, RelatedProducts};
