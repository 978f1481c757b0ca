//! The static informational pages.

use crate::layout::{Article, Block, Body, PageShell, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum StaticPage {
    About,
    Contact,
    Privacy,
    Returns,
    Terms,
}

impl StaticPage {
    pub fn path(self) -> &'static str {
        match self {
            StaticPage::About => "/about",
            StaticPage::Contact => "/contact",
            StaticPage::Privacy => "/privacy",
            StaticPage::Returns => "/returns",
            StaticPage::Terms => "/terms",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            StaticPage::About => "About Us",
            StaticPage::Contact => "Contact Us",
            StaticPage::Privacy => "Privacy Policy",
            StaticPage::Returns => "Return Policy",
            StaticPage::Terms => "Terms & Conditions",
        }
    }

    /// About and Terms carry the mobile tab bar; the policy and contact
    /// pages don't.
    pub fn has_bottom_nav(self) -> bool {
        matches!(self, StaticPage::About | StaticPage::Terms)
    }

    pub fn article(self) -> Article {
        let blocks = match self {
            StaticPage::About => about(),
            StaticPage::Contact => contact(),
            StaticPage::Privacy => privacy(),
            StaticPage::Returns => returns(),
            StaticPage::Terms => terms(),
        };
        Article { heading: self.heading(), blocks }
    }

    pub fn render(self, ctx: &ShellContext) -> PageShell {
        PageShell::new(ctx, Body::Article(self.article()), self.has_bottom_nav())
    }
}

fn about() -> Vec<Block> {
    vec![
        Block::Paragraph(
            "Mirvaa Fashions is an Indian online fashion store built to bring quality, style, and affordability together.",
        ),
        Block::Paragraph(
            "We offer a wide range of T-Shirts, Shirts, Sarees, Hoodies, Jewellery, Ladies’ Dresses, and Kids Wear, carefully selected to match every taste and occasion.",
        ),
        Block::Paragraph(
            "Our mission is simple — to make shopping feel easy, trustworthy, and enjoyable. From casuals to ethnic wear, Mirvaa Fashions celebrates individuality and comfort.",
        ),
        Block::Paragraph(
            "We’re a growing brand powered by customer trust and feedback, and every product you buy helps us design better collections ahead.",
        ),
    ]
}

fn contact() -> Vec<Block> {
    vec![
        Block::Paragraph(
            "We’d love to hear from you. If you have any questions about your orders, returns, or our products, reach out to us through the details below.",
        ),
        Block::Labeled { label: "Email", value: "support@mirvaa.com" },
        Block::Labeled { label: "Phone", value: "+91 98765 43210" },
        Block::Labeled { label: "Working Hours", value: "Monday to Saturday, 10 AM – 7 PM" },
        Block::Address {
            label: "Address",
            lines: vec![
                "Mirvaa Fashions",
                "#24, Fashion Street, Banjara Hills, Hyderabad, Telangana – 500034",
            ],
        },
        Block::Paragraph(
            "You can also message us through the “Help” option in your account for quick assistance.",
        ),
    ]
}

fn privacy() -> Vec<Block> {
    vec![
        Block::Paragraph(
            "At Mirvaa Fashions, your privacy is our priority. This policy explains how we collect, use, and protect your personal information.",
        ),
        Block::Subheading("Information We Collect:"),
        Block::Bullets(vec![
            "Name, email, phone number, shipping/billing address.",
            "Payment details (processed securely through trusted gateways like Razorpay).",
            "Browser and device information to improve your shopping experience.",
        ]),
        Block::Subheading("How We Use Your Data:"),
        Block::Bullets(vec![
            "To process and deliver your orders.",
            "To send order confirmations, updates, and offers (if opted in).",
            "To improve our website, services, and user experience.",
        ]),
        Block::Subheading("Data Protection:"),
        Block::Paragraph(
            "We never sell or rent your personal information. All payments are encrypted and processed through secure channels.",
        ),
        Block::Subheading("Cookies:"),
        Block::Paragraph(
            "We use cookies to personalize content and remember your preferences. You can manage cookies through your browser settings.",
        ),
        Block::Subheading("Contact:"),
        Block::Paragraph("If you have any privacy-related concerns, email us at privacy@mirvaa.com"),
    ]
}

fn returns() -> Vec<Block> {
    vec![
        Block::Paragraph(
            "We want you to love what you buy from Mirvaa Fashions. If you’re not completely satisfied, here’s how returns work:",
        ),
        Block::Subheading("Eligibility:"),
        Block::Bullets(vec![
            "Returns accepted within 7 days of delivery.",
            "Item must be unused, unwashed, and in original packaging with all tags intact.",
            "Certain products like jewellery, innerwear, or customized items are not returnable.",
        ]),
        Block::Subheading("Return Process:"),
        Block::Bullets(vec![
            "Go to “My Orders” → Select the item → Click “Return Request.”",
            "Choose a reason for return and submit.",
            "Our delivery partner will pick up the item from your address.",
            "Refund will be processed within 5–7 business days after quality check.",
        ]),
        Block::Subheading("Refunds:"),
        Block::Paragraph(
            "Refunds are made to your original payment method. For COD orders, refunds will be issued via bank transfer.",
        ),
        Block::Paragraph("For any help, contact returns@mirvaa.com"),
    ]
}

fn terms() -> Vec<Block> {
    vec![
        Block::Paragraph(
            "Welcome to Mirvaa Fashions. By accessing and using our website, you agree to the following terms:",
        ),
        Block::Numbered(vec![
            (
                "Use of Website",
                "You agree to use the site only for lawful purposes and not to misuse its features or content.",
            ),
            (
                "Product Information",
                "We make every effort to display products accurately, but slight variations in color or design may occur due to lighting or screen resolution.",
            ),
            (
                "Pricing and Payments",
                "All prices are listed in INR and inclusive of applicable taxes. We reserve the right to update prices or offers without prior notice.",
            ),
            (
                "Orders and Cancellations",
                "Orders may be canceled before shipment. Once shipped, cancellation requests will not be accepted.",
            ),
            ("Returns and Refunds", "Refer to our Return Policy for full details."),
            (
                "Intellectual Property",
                "All logos, images, and content belong to Mirvaa Fashions. Unauthorized use is prohibited.",
            ),
            (
                "Limitation of Liability",
                "Mirvaa Fashions is not liable for indirect or consequential losses arising from the use of our website or products.",
            ),
            (
                "Governing Law",
                "These terms are governed by the laws of India, and any disputes will be subject to Hyderabad jurisdiction.",
            ),
        ]),
    ]
}
