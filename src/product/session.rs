use tokio::sync::watch;

use super::Product;

/// Owns the process-wide record of which product is connected.
pub struct ProductManager {
    product_tx: watch::Sender<Option<Product>>,
}

impl ProductManager {
    pub fn new() -> Self {
        let (product_tx, _) = watch::channel(None);
        ProductManager { product_tx }
    }

    pub fn connect(&self, product: Product) {
        info!("product connected: {}", product.model());
        self.product_tx.send_replace(Some(product));
    }

    pub fn disconnect(&self) {
        if let Some(product) = self.product_tx.send_replace(None) {
            info!("product disconnected: {}", product.model());
        }
    }

    /// A read-only view of the connection state, suitable for handing to
    /// request handlers.
    pub fn session(&self) -> Session {
        Session {
            product_rx: self.product_tx.subscribe(),
        }
    }
}

impl Default for ProductManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    product_rx: watch::Receiver<Option<Product>>,
}

impl Session {
    /// The product connected right now, if any.
    pub fn product(&self) -> Option<Product> {
        self.product_rx.borrow().clone()
    }
}
